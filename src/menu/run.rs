//! Display loop: the screen host and the application that wires it.
//!
//! The host owns exactly one active screen. Each turn it asks that screen
//! to render and react, swaps in the next screen if one was requested,
//! records the outcome, and stops on `Exit`. Single-threaded: the loop
//! blocks on input inside the active screen and nowhere else.

use std::io;

use tracing::{debug, info, warn};

use crate::directory::UserDirectory;
use crate::types::WalletConfig;

use super::io::{InputSource, Presenter};
use super::state::{Screen, SessionState, TransitionOutcome};
use super::update::{render_and_react, ScreenContext};

// ============================================================================
// SCREEN HOST
// ============================================================================

/// Owner of the active screen and driver of the display loop.
pub struct ScreenHost<'a> {
    active: Screen,
    directory: &'a mut UserDirectory,
    session: &'a mut SessionState,
    /// Number of screen replacements so far.
    swaps: usize,
}

impl<'a> ScreenHost<'a> {
    /// Host starting on the Welcome screen.
    pub fn new(directory: &'a mut UserDirectory, session: &'a mut SessionState) -> Self {
        ScreenHost {
            active: Screen::Welcome,
            directory,
            session,
            swaps: 0,
        }
    }

    pub fn active_screen(&self) -> Screen {
        self.active
    }

    pub fn screen_swaps(&self) -> usize {
        self.swaps
    }

    pub fn session(&self) -> &SessionState {
        self.session
    }

    pub fn directory(&self) -> &UserDirectory {
        self.directory
    }

    /// Replace the active screen. The previous one is dropped here.
    ///
    /// Replacing a screen with the same kind still counts as a fresh screen.
    pub fn set_active_screen(&mut self, screen: Screen) {
        let previous = std::mem::replace(&mut self.active, screen);
        self.swaps += 1;
        debug!(from = ?previous, to = ?screen, "screen swap");
    }

    /// Run the active screen once and apply its transition.
    pub fn step<P: Presenter, I: InputSource>(
        &mut self,
        presenter: &mut P,
        input: &mut I,
    ) -> io::Result<TransitionOutcome> {
        let mut ctx = ScreenContext {
            session: &mut *self.session,
            directory: &mut *self.directory,
            presenter,
            input,
        };
        let transition = render_and_react(self.active, &mut ctx)?;

        if let Some(next) = transition.next {
            self.set_active_screen(next);
        }
        self.session.last_outcome = transition.outcome;
        Ok(transition.outcome)
    }

    /// Step until a screen answers `Exit`. `Error` outcomes keep the loop going.
    pub fn run_loop<P: Presenter, I: InputSource>(
        &mut self,
        presenter: &mut P,
        input: &mut I,
    ) -> io::Result<()> {
        loop {
            match self.step(presenter, input)? {
                TransitionOutcome::Exit => break,
                TransitionOutcome::Error => {
                    debug!(screen = ?self.active, "recoverable error, continuing");
                }
                TransitionOutcome::Continue => {}
            }
        }
        info!(swaps = self.swaps, "menu loop finished");
        Ok(())
    }
}

// ============================================================================
// APPLICATION
// ============================================================================

/// The user directory and the session for one run of the wallet.
#[derive(Debug)]
pub struct Application {
    directory: UserDirectory,
    session: SessionState,
}

impl Application {
    /// Build the directory (seeded per `config`) and an empty session.
    pub fn new(config: &WalletConfig) -> Self {
        let mut directory = UserDirectory::new(config.capacity);
        if let Some(seed) = &config.seed_user {
            if directory.add(seed.to_user()) {
                debug!(username = %seed.username, "seed user added");
            } else {
                warn!(capacity = config.capacity, "no room for the seed user");
            }
        }
        Application {
            directory,
            session: SessionState::new(),
        }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Run the menu from the Welcome screen until it exits.
    pub fn run<P: Presenter, I: InputSource>(
        &mut self,
        presenter: &mut P,
        input: &mut I,
    ) -> io::Result<()> {
        let mut host = ScreenHost::new(&mut self.directory, &mut self.session);
        host.run_loop(presenter, input)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::io::{LineInput, TerminalPresenter};
    use crate::types::User;
    use rust_decimal::Decimal;
    use std::io::Cursor;

    fn script(keys: &str) -> LineInput<Cursor<Vec<u8>>> {
        LineInput::new(Cursor::new(keys.as_bytes().to_vec()))
    }

    /// Run a whole session under `config`; returns the app and its output.
    fn run_app(config: &WalletConfig, keys: &str) -> (Application, String) {
        let mut app = Application::new(config);
        let mut presenter = TerminalPresenter::new(Vec::new());
        app.run(&mut presenter, &mut script(keys)).unwrap();
        (app, String::from_utf8(presenter.into_inner()).unwrap())
    }

    // -- ScreenHost --

    #[test]
    fn host_starts_on_welcome() {
        let mut dir = UserDirectory::new(1);
        let mut session = SessionState::new();
        let host = ScreenHost::new(&mut dir, &mut session);
        assert_eq!(host.active_screen(), Screen::Welcome);
        assert_eq!(host.screen_swaps(), 0);
    }

    #[test]
    fn welcome_s_makes_sign_up_active() {
        let mut dir = UserDirectory::new(1);
        let mut session = SessionState::new();
        let mut host = ScreenHost::new(&mut dir, &mut session);
        let mut presenter = TerminalPresenter::new(Vec::new());
        let outcome = host.step(&mut presenter, &mut script("s\n")).unwrap();
        assert_eq!(outcome, TransitionOutcome::Continue);
        assert_eq!(host.active_screen(), Screen::SignUp);
    }

    #[test]
    fn sign_up_mismatch_reinstantiates_sign_up() {
        let mut dir = UserDirectory::new(5);
        let mut session = SessionState::new();
        let mut host = ScreenHost::new(&mut dir, &mut session);
        host.set_active_screen(Screen::SignUp);
        let mut presenter = TerminalPresenter::new(Vec::new());

        let outcome = host
            .step(&mut presenter, &mut script("amy abc xyz\n"))
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::Continue);
        assert_eq!(host.active_screen(), Screen::SignUp);
        assert_eq!(host.screen_swaps(), 2);
        assert_eq!(host.directory().size(), 0);
    }

    #[test]
    fn login_makes_user_menu_active_with_session() {
        let mut dir = UserDirectory::new(5);
        dir.add(User::new("bob", "pw1"));
        let mut session = SessionState::new();
        let mut host = ScreenHost::new(&mut dir, &mut session);
        host.set_active_screen(Screen::Login);
        let mut presenter = TerminalPresenter::new(Vec::new());

        host.step(&mut presenter, &mut script("bob\npw1\n")).unwrap();
        assert_eq!(host.active_screen(), Screen::UserMenu);
        assert!(host.session().is_logged_in());
    }

    #[test]
    fn user_menu_withdraw_too_much_keeps_balance() {
        let mut dir = UserDirectory::new(5);
        let mut session = SessionState::new();
        session.log_in(User::with_balance("bob", "pw1", Decimal::from(100)));
        let mut host = ScreenHost::new(&mut dir, &mut session);
        host.set_active_screen(Screen::UserMenu);
        let mut presenter = TerminalPresenter::new(Vec::new());

        let outcome = host.step(&mut presenter, &mut script("2\n150\n")).unwrap();
        assert_eq!(outcome, TransitionOutcome::Continue);
        assert_eq!(host.active_screen(), Screen::UserMenu);
        let balance = host.session().current_user.as_ref().unwrap().balance();
        assert_eq!(balance, Decimal::from(100));
    }

    #[test]
    fn step_records_last_outcome() {
        let mut dir = UserDirectory::new(1);
        let mut session = SessionState::new();
        {
            let mut host = ScreenHost::new(&mut dir, &mut session);
            let mut presenter = TerminalPresenter::new(Vec::new());
            let outcome = host.step(&mut presenter, &mut script("nope\n")).unwrap();
            assert_eq!(outcome, TransitionOutcome::Error);
            assert_eq!(host.active_screen(), Screen::Welcome);
        }
        assert_eq!(session.last_outcome, TransitionOutcome::Error);
    }

    #[test]
    fn run_loop_stops_on_welcome_quit() {
        let mut dir = UserDirectory::new(1);
        let mut session = SessionState::new();
        let mut host = ScreenHost::new(&mut dir, &mut session);
        let mut presenter = TerminalPresenter::new(Vec::new());
        host.run_loop(&mut presenter, &mut script("Q\n")).unwrap();
        assert_eq!(host.session().last_outcome, TransitionOutcome::Exit);
    }

    #[test]
    fn missing_session_in_user_menu_falls_back_without_reading() {
        let mut dir = UserDirectory::new(1);
        let mut session = SessionState::new();
        let mut host = ScreenHost::new(&mut dir, &mut session);
        host.set_active_screen(Screen::UserMenu);
        let mut presenter = TerminalPresenter::new(Vec::new());
        let mut input = script("q\n");

        let outcome = host.step(&mut presenter, &mut input).unwrap();
        assert_eq!(outcome, TransitionOutcome::Error);
        assert_eq!(host.active_screen(), Screen::Welcome);
        // The pending "q" is still there for Welcome.
        assert_eq!(
            host.step(&mut presenter, &mut input).unwrap(),
            TransitionOutcome::Exit
        );
    }

    // -- Application scenarios --

    #[test]
    fn application_seeds_default_user() {
        let app = Application::new(&WalletConfig::default());
        assert_eq!(app.directory().size(), 1);
        assert!(app
            .directory()
            .find_by_credentials(&User::new("Mohamed", "12345"))
            .is_some());
        assert!(!app.session().is_logged_in());
    }

    #[test]
    fn application_without_seed_starts_empty() {
        let config = WalletConfig {
            seed_user: None,
            ..WalletConfig::default()
        };
        assert_eq!(Application::new(&config).directory().size(), 0);
    }

    #[test]
    fn seed_user_dropped_when_capacity_is_zero() {
        let config = WalletConfig {
            capacity: 0,
            ..WalletConfig::default()
        };
        assert_eq!(Application::new(&config).directory().size(), 0);
    }

    #[test]
    fn invalid_welcome_input_does_not_stop_the_loop() {
        let (app, out) = run_app(&WalletConfig::default(), "x\ny\nq\n");
        assert_eq!(out.matches("Invalid selection").count(), 2);
        assert!(out.contains("Goodbye!"));
        assert_eq!(app.session().last_outcome, TransitionOutcome::Exit);
    }

    #[test]
    fn seeded_user_logs_in_deposits_and_logs_out() {
        let keys = "l\nMohamed\n12345\n3\n500\n1\n5\nq\n";
        let (app, out) = run_app(&WalletConfig::default(), keys);
        assert!(out.contains("Welcome Mohamed"));
        assert!(out.contains("Your Balance: 2500.00"));
        assert!(out.contains("Logged Out"));
        assert!(!app.session().is_logged_in());
    }

    #[test]
    fn balance_changes_are_lost_on_relogin() {
        // Login copies the stored user; deposits never reach the directory.
        let keys = "l Mohamed 12345 3 500 5 l Mohamed 12345 1 5 q\n";
        let (_, out) = run_app(&WalletConfig::default(), keys);
        assert!(out.contains("Your new balance: 2500.00"));
        assert!(out.contains("Your Balance: 2000.00"));
        assert!(!out.contains("Your Balance: 2500.00"));
    }

    #[test]
    fn new_user_signs_up_then_logs_in() {
        let keys = "s amy abc abc 75 amy abc 1 5 q\n";
        let (app, out) = run_app(&WalletConfig::default(), keys);
        assert_eq!(app.directory().size(), 2);
        assert!(out.contains("User: amy Created Successfully"));
        assert!(out.contains("Welcome amy"));
        assert!(out.contains("Your Balance: 75.00"));
    }

    #[test]
    fn failed_login_retries_then_cancels() {
        let keys = "l bob nope r Mohamed wrong q q\n";
        let (app, out) = run_app(&WalletConfig::default(), keys);
        assert_eq!(out.matches("Invalid username or password.").count(), 2);
        assert!(out.contains("Login cancelled."));
        assert!(!app.session().is_logged_in());
    }

    #[test]
    fn pay_pills_round_trip_then_exit_from_bills() {
        let keys = "l Mohamed 12345 4 1 0100 150 4 1 4 9\n";
        let (app, out) = run_app(&WalletConfig::default(), keys);
        assert!(out.contains("0100 Recharged with amount 150.00 Successfully"));
        assert!(out.contains("Your Balance: 1850.00"));
        assert_eq!(app.session().last_outcome, TransitionOutcome::Exit);
        assert!(app.session().is_logged_in());
    }

    #[test]
    fn end_of_input_ends_the_loop_cleanly() {
        let (app, _) = run_app(&WalletConfig::default(), "l Mohamed");
        assert_eq!(app.session().last_outcome, TransitionOutcome::Exit);
    }

    #[test]
    fn sign_up_into_full_directory_keeps_running() {
        let config = WalletConfig {
            capacity: 1,
            ..WalletConfig::default()
        };
        // Full directory: report, then Login, where amy is unknown.
        let (app, out) = run_app(&config, "s amy abc abc 10 amy abc q q\n");
        assert!(out.contains("user directory is full"));
        assert!(out.contains("Login Page::Enter Login Credentials"));
        assert!(out.contains("Invalid username or password."));
        assert_eq!(app.directory().size(), 1);
        assert!(app.session().current_user.is_none());
        assert_eq!(app.session().last_outcome, TransitionOutcome::Exit);
    }

    #[test]
    fn deposit_past_decimal_max_is_reported_and_session_continues() {
        let keys = "l Mohamed 12345 3 79228162514264337593543950335 1 5 q\n";
        let (app, out) = run_app(&WalletConfig::default(), keys);
        assert!(out.contains("is out of range"));
        assert!(out.contains("Your Balance: 2000.00"));
        assert!(out.contains("Logged Out"));
        assert_eq!(app.session().last_outcome, TransitionOutcome::Exit);
    }

    #[test]
    fn huge_negative_recharge_is_reported_and_session_continues() {
        let keys = "l Mohamed 12345 4 1 0100 -79228162514264337593543950335 4 1 5 q\n";
        let (app, out) = run_app(&WalletConfig::default(), keys);
        assert!(out.contains("is out of range"));
        assert!(out.contains("Your Balance: 2000.00"));
        assert!(!out.contains("Recharged"));
        assert_eq!(app.session().last_outcome, TransitionOutcome::Exit);
    }
}
