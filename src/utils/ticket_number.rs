use chrono::Utc;
use rand::Rng;

const CARRIER_PREFIX: &str = "LJ";

/// Which leg of a booking a ticket number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
    Single,
    Outbound,
    Return,
}

impl LegKind {
    fn suffix(self) -> &'static str {
        match self {
            LegKind::Single => "",
            LegKind::Outbound => "OUT",
            LegKind::Return => "RTN",
        }
    }
}

/// Mint a ticket number: carrier prefix, millisecond timestamp, a 4-digit
/// entropy block against same-instant collisions, and the leg suffix.
pub fn mint(leg: LegKind) -> String {
    let millis = Utc::now().timestamp_millis();
    let entropy: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{}{}{:04}{}", CARRIER_PREFIX, millis, entropy, leg.suffix())
}
