use std::io::{self, Write as _};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::api::ApiClient;
use crate::models::flight::{FlightStatus, SeatClass, AIRPORTS};
use crate::models::payment::{CardDetails, MobileMoneyDetails, MobileNetwork, PaymentDetails};
use crate::models::user::Role;
use crate::models::booking::TripType;
use crate::models::flight::{DayOfWeek, Flight, NewAirplaneRequest};
use crate::services::admin::{AdminService, RecurringFlightForm, SingleFlightForm};
use crate::services::booking::{can_cancel, BookingService, CANCEL_CUTOFF_MESSAGE};
use crate::services::payment::PaymentService;
use crate::services::session::Session;
use crate::services::workflow::{BookingWorkflow, OutboundSelection, SearchCriteria};
use crate::utils::error::AppError;
use crate::views::{self, Notifier};

fn prompt(label: &str) -> String {
    print!("{label}: ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn confirm(label: &str) -> bool {
    matches!(prompt(&format!("{label} (y/n)")).to_lowercase().as_str(), "y" | "yes")
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// The interactive terminal front-end: one method per screen, all wired
/// to the same service layer.
pub struct App {
    client: ApiClient,
    session: Session,
    bookings: BookingService,
    payments: PaymentService,
    admin: AdminService,
    notifier: Notifier,
}

impl App {
    pub fn new(client: ApiClient, session: Session) -> Self {
        App {
            bookings: BookingService::new(client.clone()),
            payments: PaymentService::new(client.clone()),
            admin: AdminService::new(client.clone()),
            client,
            session,
            notifier: Notifier,
        }
    }

    /// Empty input aborts; bad input asks again.
    fn prompt_parse<T: FromStr>(&self, label: &str) -> Option<T> {
        loop {
            let raw = prompt(label);
            if raw.is_empty() {
                return None;
            }
            match raw.parse() {
                Ok(value) => return Some(value),
                Err(_) => self
                    .notifier
                    .error("Invalid input, try again (leave empty to go back)"),
            }
        }
    }

    /// One place for failure handling: auth rejections clear the session
    /// and send the user back to login, everything else is surfaced as-is.
    fn handle_error(&mut self, error: AppError) {
        let forced = error.is_auth();
        self.notifier.error(&error.to_string());
        if forced {
            self.session.force_reauth();
            self.notifier.info("Please log in again");
        }
    }

    pub async fn run(&mut self) {
        self.notifier.info("Welcome to LEJET Airlines");
        loop {
            println!();
            let signed_in = self
                .session
                .current_user()
                .map(|user| format!("{} ({})", user.email, user.role));
            match signed_in {
                Some(line) => {
                    println!("Signed in as {line}");
                    println!("[1] Book a flight");
                    println!("[2] My bookings");
                    println!("[3] Send feedback");
                    println!("[4] Log out");
                    if self.session.is_admin() {
                        println!("[5] Admin dashboard");
                    }
                    println!("[0] Exit");
                    match prompt("Choose").as_str() {
                        "1" => self.booking_flow().await,
                        "2" => self.dashboard().await,
                        "3" => self.feedback_screen().await,
                        "4" => {
                            self.session.logout();
                            self.notifier.success("Logged out");
                        }
                        "5" if self.session.is_admin() => self.admin_menu().await,
                        "0" => return,
                        _ => self.notifier.error("Unknown option"),
                    }
                }
                None => {
                    println!("[1] Log in");
                    println!("[2] Sign up");
                    println!("[3] Book a flight");
                    println!("[4] Send feedback");
                    println!("[0] Exit");
                    match prompt("Choose").as_str() {
                        "1" => {
                            self.login_screen().await;
                        }
                        "2" => {
                            self.signup_screen().await;
                        }
                        "3" => self.booking_flow().await,
                        "4" => self.feedback_screen().await,
                        "0" => return,
                        _ => self.notifier.error("Unknown option"),
                    }
                }
            }
        }
    }

    // --- identity screens ---

    async fn login_screen(&mut self) -> bool {
        let email = prompt("Email");
        let password = prompt("Password");
        if email.is_empty() || password.is_empty() {
            self.notifier.error("Email and password are required");
            return false;
        }
        match self.session.login(email, password).await {
            Ok(user) => {
                let greeting = format!("Welcome back, {}", user.email);
                self.notifier.success(&greeting);
                true
            }
            Err(e) => {
                self.notifier.error(&e.to_string());
                false
            }
        }
    }

    async fn signup_screen(&mut self) -> bool {
        let email = prompt("Email");
        let password = prompt("Password");
        if email.is_empty() || password.is_empty() {
            self.notifier.error("Email and password are required");
            return false;
        }
        match self.session.signup(email, password, Role::User).await {
            Ok(user) => {
                let greeting = format!("Account created, welcome {}", user.email);
                self.notifier.success(&greeting);
                true
            }
            Err(e) => {
                self.notifier.error(&e.to_string());
                false
            }
        }
    }

    // --- booking flow: search -> select -> confirm -> pay -> ticket ---

    fn choose_airport(&self, label: &str, exclude: Option<&str>) -> Option<String> {
        let options: Vec<&str> = AIRPORTS
            .iter()
            .copied()
            .filter(|airport| Some(*airport) != exclude)
            .collect();
        println!("{label}:");
        for (index, airport) in options.iter().enumerate() {
            println!("  [{}] {}", index + 1, airport);
        }
        let choice: usize = self.prompt_parse("Airport (number)")?;
        choice
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .map(|s| s.to_string())
    }

    fn gather_criteria(&mut self) -> Option<SearchCriteria> {
        let trip_type = match prompt("Trip type: [1] one-way, [2] round trip").as_str() {
            "1" | "" => TripType::OneWay,
            "2" => TripType::RoundTrip,
            other => match other.parse() {
                Ok(t) => t,
                Err(_) => {
                    self.notifier.error("Unknown trip type");
                    return None;
                }
            },
        };
        let from = self.choose_airport("From", None)?;
        let to = self.choose_airport("To", Some(&from))?;
        let departure_date: NaiveDate = self.prompt_parse("Departure date (YYYY-MM-DD)")?;
        let return_date = if trip_type == TripType::RoundTrip {
            Some(self.prompt_parse::<NaiveDate>("Return date (YYYY-MM-DD)")?)
        } else {
            None
        };
        let passengers: u32 = self.prompt_parse("Passengers (1-9)")?;
        let seat_class = match prompt("Class: [1] economy, [2] first class").as_str() {
            "1" | "" => SeatClass::Economy,
            "2" => SeatClass::FirstClass,
            other => match other.parse() {
                Ok(c) => c,
                Err(_) => {
                    self.notifier.error("Unknown seat class");
                    return None;
                }
            },
        };
        Some(SearchCriteria {
            trip_type,
            from,
            to,
            departure_date,
            return_date,
            passengers,
            seat_class,
        })
    }

    async fn booking_flow(&mut self) {
        let Some(criteria) = self.gather_criteria() else {
            return;
        };
        let mut workflow = match BookingWorkflow::new(criteria) {
            Ok(workflow) => workflow,
            Err(e) => return self.handle_error(e),
        };

        if let Err(e) = self.bookings.search_outbound(&mut workflow).await {
            return self.handle_error(e);
        }
        let outbound: Vec<Flight> = workflow.outbound_results().unwrap_or_default().to_vec();
        if outbound.is_empty() {
            self.notifier.info("No flights available for the selected date");
            return;
        }
        let tag = match workflow.criteria().trip_type {
            TripType::OneWay => "One Way Flight",
            TripType::RoundTrip => "Outbound Flight",
        };
        print!(
            "{}",
            views::flights::flight_list(
                &outbound,
                workflow.criteria().seat_class,
                workflow.criteria().passengers,
                tag,
            )
        );
        let Some(choice) = self.prompt_parse::<usize>("Select a flight (number)") else {
            return;
        };
        let Some(selected) = choice
            .checked_sub(1)
            .and_then(|i| outbound.get(i))
            .map(|f| f.id.clone())
        else {
            self.notifier.error("No such flight in the results");
            return;
        };

        match workflow.select_outbound(&selected) {
            Ok(OutboundSelection::DraftReady) => {}
            Ok(OutboundSelection::NeedsReturnLeg) => {
                if !self.return_leg_screen(&mut workflow).await {
                    return;
                }
            }
            Err(e) => return self.handle_error(e),
        }

        self.confirmation_screen(workflow).await;
    }

    async fn return_leg_screen(&mut self, workflow: &mut BookingWorkflow) -> bool {
        if let Err(e) = self.bookings.search_return(workflow).await {
            self.handle_error(e);
            return false;
        }
        let returns: Vec<Flight> = workflow.return_results().unwrap_or_default().to_vec();
        if returns.is_empty() {
            self.notifier
                .info("No return flights available for the selected date");
            return false;
        }
        print!(
            "{}",
            views::flights::flight_list(
                &returns,
                workflow.criteria().seat_class,
                workflow.criteria().passengers,
                "Return Flight",
            )
        );
        let Some(choice) = self.prompt_parse::<usize>("Select a return flight (number)") else {
            return false;
        };
        let Some(selected) = choice
            .checked_sub(1)
            .and_then(|i| returns.get(i))
            .map(|f| f.id.clone())
        else {
            self.notifier.error("No such flight in the results");
            return false;
        };
        if let Err(e) = workflow.select_return(&selected) {
            self.handle_error(e);
            return false;
        }
        true
    }

    async fn confirmation_screen(&mut self, mut workflow: BookingWorkflow) {
        let outbound_id = {
            let draft = match workflow.draft() {
                Ok(draft) => draft,
                Err(e) => {
                    // missing precursor: back to search
                    self.handle_error(e);
                    return;
                }
            };
            println!();
            print!("{}", views::bookings::draft_summary(draft));
            draft.outbound.flight.id.clone()
        };

        if !self.session.is_authenticated() {
            self.notifier.info("Please log in to book a flight");
            if !self.login_screen().await {
                return;
            }
        }

        // re-resolve the outbound leg; the search result may have gone stale
        match self.bookings.flight_by_id(&outbound_id).await {
            Ok(flight) if flight.status != FlightStatus::Scheduled => {
                self.notifier.error("This flight is no longer available");
                return;
            }
            Ok(_) => {}
            Err(e) if e.is_auth() => return self.handle_error(e),
            Err(e) => self.notifier.error(&e.to_string()),
        }

        loop {
            if !confirm("Confirm booking?") {
                self.notifier.info("Booking discarded");
                return;
            }
            match self.bookings.confirm_draft(&mut workflow).await {
                Ok(()) => {
                    self.notifier
                        .success("Booking created! Proceeding to payment...");
                    break;
                }
                Err(e) => {
                    let forced = e.is_auth();
                    self.handle_error(e);
                    // the draft is still intact; the user may retry or leave
                    if forced || !confirm("Try again?") {
                        return;
                    }
                }
            }
        }

        self.payment_screen(&mut workflow).await;
    }

    fn gather_payment_details(&mut self) -> Option<PaymentDetails> {
        match prompt("Payment method: [1] credit card, [2] mobile money").as_str() {
            "1" => Some(PaymentDetails::Card(CardDetails {
                card_number: prompt("Card number"),
                expiry_date: prompt("Expiry date (MM/YY)"),
                cvv: prompt("CVV"),
            })),
            "2" => {
                println!("Networks:");
                println!("  [1] {}", MobileNetwork::Mtn);
                println!("  [2] {}", MobileNetwork::Vodafone);
                println!("  [3] {}", MobileNetwork::AirtelTigo);
                let network = match prompt("Network (number)").as_str() {
                    "1" => MobileNetwork::Mtn,
                    "2" => MobileNetwork::Vodafone,
                    "3" => MobileNetwork::AirtelTigo,
                    _ => {
                        self.notifier.error("Please select a payment network");
                        return None;
                    }
                };
                Some(PaymentDetails::MobileMoney(MobileMoneyDetails {
                    network,
                    phone_number: prompt("Phone number"),
                }))
            }
            _ => {
                self.notifier.error("Please select a payment method");
                None
            }
        }
    }

    async fn payment_screen(&mut self, workflow: &mut BookingWorkflow) {
        match workflow.awaiting_booking() {
            Ok(booking) => {
                let line = format!(
                    "Amount to pay: {}",
                    views::format::cedi(booking.total_amount)
                );
                self.notifier.info(&line);
            }
            Err(e) => return self.handle_error(e),
        }

        loop {
            let Some(details) = self.gather_payment_details() else {
                self.notifier
                    .info("Payment not completed; the booking remains pending");
                return;
            };
            match self.payments.submit(workflow, details).await {
                Ok(()) => {
                    self.notifier.success("Payment successful!");
                    break;
                }
                Err(e) if e.is_auth() => return self.handle_error(e),
                Err(e) => {
                    self.notifier.error(&e.to_string());
                    if !confirm("Retry payment?") {
                        self.notifier
                            .info("Payment not completed; the booking remains pending");
                        return;
                    }
                }
            }
        }

        self.ticket_screen(workflow).await;
    }

    async fn ticket_screen(&mut self, workflow: &mut BookingWorkflow) {
        let booking = match workflow.confirmed_booking() {
            Ok(booking) => booking.clone(),
            Err(e) => return self.handle_error(e),
        };
        println!();
        let mut stdout = io::stdout();
        if views::ticket::print_ticket(&booking, &mut stdout).is_err() {
            self.notifier.error("Could not print the ticket");
        }

        if confirm("Cancel this booking?") {
            match self.bookings.cancel(&booking).await {
                Ok(()) => {
                    let _ = workflow.mark_cancelled();
                    self.notifier.success("Booking cancelled successfully");
                }
                Err(e) => self.handle_error(e),
            }
        }
    }

    // --- dashboard ---

    async fn dashboard(&mut self) {
        let bookings = match self.bookings.my_bookings().await {
            Ok(bookings) => bookings,
            Err(e) => return self.handle_error(e),
        };
        println!();
        print!("{}", views::bookings::booking_list(&bookings, Utc::now()));
        if bookings.is_empty() {
            return;
        }

        let raw = prompt("Enter v<n> to view a ticket, c<n> to cancel, empty to go back");
        if raw.is_empty() {
            return;
        }
        let mut chars = raw.chars();
        let action = chars.next().unwrap_or(' ').to_ascii_lowercase();
        let index = match chars.as_str().trim().parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                self.notifier.error("Use v<number> or c<number>");
                return;
            }
        };
        let Some(booking) = bookings.get(index) else {
            self.notifier.error("No such booking");
            return;
        };

        if action == 'v' {
            // re-resolve by id: the ticket must show the backend's state,
            // not the dashboard's copy
            match self.bookings.booking_by_id(&booking.id).await {
                Ok(fresh) => {
                    println!();
                    let mut stdout = io::stdout();
                    if views::ticket::print_ticket(&fresh, &mut stdout).is_err() {
                        self.notifier.error("Could not print the ticket");
                    }
                }
                Err(e) => self.handle_error(e),
            }
            return;
        }
        if action != 'c' {
            self.notifier.error("Use v<number> or c<number>");
            return;
        }
        // affordance-level check before the service re-checks it
        if !can_cancel(booking.departure_time(), Utc::now()) {
            self.notifier.error(CANCEL_CUTOFF_MESSAGE);
            return;
        }
        let question = format!(
            "Are you sure you want to cancel your booking from {} to {} on {}?",
            booking.outbound().flight.from,
            booking.outbound().flight.to,
            views::format::date(booking.departure_time().date_naive()),
        );
        if !confirm(&question) {
            return;
        }
        match self.bookings.cancel(booking).await {
            Ok(()) => self.notifier.success("Booking cancelled successfully"),
            Err(e) => self.handle_error(e),
        }
    }

    // --- feedback ---

    async fn feedback_screen(&mut self) {
        let feedback = prompt("Your feedback");
        if feedback.is_empty() {
            return;
        }
        match self.client.send_feedback(&feedback).await {
            Ok(()) => self.notifier.success("Thank you for your feedback!"),
            Err(e) => self.handle_error(e),
        }
    }

    // --- administration ---

    async fn admin_menu(&mut self) {
        loop {
            println!();
            println!("Admin Dashboard");
            println!("[1] List airplanes");
            println!("[2] Add airplane");
            println!("[3] List flights");
            println!("[4] Schedule flight");
            println!("[5] Monthly report");
            println!("[0] Back");
            match prompt("Choose").as_str() {
                "1" => self.list_airplanes().await,
                "2" => self.add_airplane().await,
                "3" => self.list_flights().await,
                "4" => self.schedule_flight().await,
                "5" => self.monthly_report().await,
                "0" => return,
                _ => self.notifier.error("Unknown option"),
            }
            if !self.session.is_authenticated() {
                // an admin call hit a 401/403 and tore the session down
                return;
            }
        }
    }

    async fn list_airplanes(&mut self) {
        match self.admin.airplanes().await {
            Ok(airplanes) => {
                if airplanes.is_empty() {
                    self.notifier.info("No airplanes registered");
                }
                for airplane in airplanes {
                    println!(
                        "{} (capacity {}, at {})",
                        airplane.name,
                        airplane
                            .capacity
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "?".into()),
                        airplane.current_location.as_deref().unwrap_or("unknown"),
                    );
                }
            }
            Err(e) => self.handle_error(e),
        }
    }

    async fn add_airplane(&mut self) {
        let name = prompt("Airplane name");
        let Some(capacity) = self.prompt_parse::<u32>("Capacity") else {
            return;
        };
        let current_location = prompt("Current location");
        let request = NewAirplaneRequest {
            name,
            capacity,
            current_location,
        };
        match self.admin.add_airplane(request).await {
            Ok(()) => self.notifier.success("Airplane added successfully"),
            Err(e) => self.handle_error(e),
        }
    }

    async fn list_flights(&mut self) {
        match self.admin.flights().await {
            Ok(flights) => {
                if flights.is_empty() {
                    self.notifier.info("No flights scheduled");
                }
                for flight in flights {
                    println!(
                        "{} -> {}  {}  {}  economy {} / first {}",
                        flight.from,
                        flight.to,
                        views::format::short_datetime(flight.departure_time),
                        flight.airplane_label(),
                        views::format::cedi(flight.economy_price),
                        views::format::cedi(flight.first_class_price),
                    );
                }
            }
            Err(e) => self.handle_error(e),
        }
    }

    fn prompt_time(&self, label: &str) -> Option<NaiveTime> {
        loop {
            let raw = prompt(label);
            if raw.is_empty() {
                return None;
            }
            match parse_time(&raw) {
                Some(time) => return Some(time),
                None => self.notifier.error("Use HH:MM (leave empty to go back)"),
            }
        }
    }

    async fn schedule_flight(&mut self) {
        let Some(airplane_id) = self.prompt_airplane_id().await else {
            return;
        };
        let Some(from) = self.choose_airport("From", None) else {
            return;
        };
        let Some(to) = self.choose_airport("To", Some(&from)) else {
            return;
        };
        let Some(departure_time) = self.prompt_time("Departure time (HH:MM)") else {
            return;
        };
        let Some(arrival_time) = self.prompt_time("Arrival time (HH:MM)") else {
            return;
        };
        let Some(economy_price) = self.prompt_parse::<Decimal>("Economy price") else {
            return;
        };
        let Some(first_class_price) = self.prompt_parse::<Decimal>("First class price") else {
            return;
        };

        let result = if confirm("Recurring flight?") {
            let mut days = Vec::new();
            loop {
                let raw = prompt("Add a day (e.g. Monday, empty to finish)");
                if raw.is_empty() {
                    break;
                }
                match raw.parse::<DayOfWeek>() {
                    Ok(day) => {
                        if !days.contains(&day) {
                            days.push(day);
                        }
                    }
                    Err(_) => self.notifier.error("Unknown day of week"),
                }
            }
            let Some(start_date) = self.prompt_parse::<NaiveDate>("Start date (YYYY-MM-DD)")
            else {
                return;
            };
            let Some(end_date) = self.prompt_parse::<NaiveDate>("End date (YYYY-MM-DD)") else {
                return;
            };
            self.admin
                .schedule_recurring_flight(RecurringFlightForm {
                    airplane_id,
                    from,
                    to,
                    departure_time,
                    arrival_time,
                    days,
                    start_date,
                    end_date,
                    economy_price,
                    first_class_price,
                })
                .await
        } else {
            let Some(date) = self.prompt_parse::<NaiveDate>("Departure date (YYYY-MM-DD)") else {
                return;
            };
            self.admin
                .schedule_single_flight(SingleFlightForm {
                    airplane_id,
                    from,
                    to,
                    date,
                    departure_time,
                    arrival_time,
                    economy_price,
                    first_class_price,
                })
                .await
        };

        match result {
            Ok(()) => self.notifier.success("Flight scheduled successfully"),
            Err(e) => self.handle_error(e),
        }
    }

    async fn prompt_airplane_id(&mut self) -> Option<String> {
        let airplanes = match self.admin.airplanes().await {
            Ok(airplanes) => airplanes,
            Err(e) => {
                self.handle_error(e);
                return None;
            }
        };
        let options: Vec<_> = airplanes
            .into_iter()
            .filter(|airplane| airplane.id.is_some())
            .collect();
        if options.is_empty() {
            self.notifier.error("Add an airplane first");
            return None;
        }
        println!("Airplanes:");
        for (index, airplane) in options.iter().enumerate() {
            println!("  [{}] {}", index + 1, airplane.name);
        }
        let choice: usize = self.prompt_parse("Airplane (number)")?;
        choice
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .and_then(|a| a.id.clone())
    }

    async fn monthly_report(&mut self) {
        let Some(month) = self.prompt_parse::<u32>("Month (1-12)") else {
            return;
        };
        let Some(year) = self.prompt_parse::<i32>("Year") else {
            return;
        };
        match self.admin.monthly_revenue(month, year).await {
            Ok(report) => {
                println!();
                print!("{}", views::report::monthly_report(&report, month, year));
            }
            Err(e) => self.handle_error(e),
        }
    }
}
