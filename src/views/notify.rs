/// The single user-facing notification channel. Every component reports
/// its outcome here; nothing fails silently into the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifier;

impl Notifier {
    pub fn info(&self, message: &str) {
        println!("  i  {message}");
    }

    pub fn success(&self, message: &str) {
        println!("  \u{2714}  {message}");
    }

    pub fn error(&self, message: &str) {
        eprintln!("  \u{2716}  {message}");
    }
}
