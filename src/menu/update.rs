//! Screen reactions: render a screen, read input, decide the next step.
//!
//! Each screen owns its outgoing edges. A handler prints through the
//! [`Presenter`], reads through the [`InputSource`], mutates the session or
//! directory, and returns a [`Transition`] for the host to apply. Only
//! terminal I/O failures escape as `Err`; every wallet failure is printed
//! and turned into an outcome here.

use std::io;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::directory::UserDirectory;
use crate::error::WalletError;
use crate::types::{format_amount, parse_amount, Severity, User};

use super::io::{InputSource, Presenter};
use super::state::{Screen, SessionState, Transition};

/// Everything a screen may touch while it runs.
pub struct ScreenContext<'a, P: Presenter, I: InputSource> {
    pub session: &'a mut SessionState,
    pub directory: &'a mut UserDirectory,
    pub presenter: &'a mut P,
    pub input: &'a mut I,
}

impl<P: Presenter, I: InputSource> ScreenContext<'_, P, I> {
    /// Show `prompt` and read one token. None at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.presenter.prompt(prompt)?;
        self.input.read_token()
    }

    /// Show `prompt` and read one token as an amount.
    fn ask_amount(&mut self, prompt: &str) -> io::Result<Option<Result<Decimal, WalletError>>> {
        Ok(self.ask(prompt)?.map(|token| parse_amount(&token)))
    }

    fn say(&mut self, text: &str, severity: Severity) -> io::Result<()> {
        self.presenter.message(text, severity)
    }

    /// Report bad input and stay on the current screen.
    fn reject(&mut self, err: WalletError) -> io::Result<Transition> {
        self.say(&err.to_string(), Severity::Warning)?;
        Ok(Transition::error())
    }

    /// Report a screen reached with nobody logged in and fall back to Welcome.
    fn missing_session(&mut self, screen: Screen) -> io::Result<Transition> {
        warn!(?screen, "screen requires a logged-in user");
        self.say(&WalletError::MissingSession.to_string(), Severity::Error)?;
        Ok(Transition::to_with_error(Screen::Welcome))
    }
}

/// End of input stops the loop as if the user had quit.
fn input_closed(screen: Screen) -> Transition {
    warn!(?screen, "input closed, leaving menu loop");
    Transition::exit()
}

/// Render `screen` and react to the user's input.
pub fn render_and_react<P: Presenter, I: InputSource>(
    screen: Screen,
    ctx: &mut ScreenContext<'_, P, I>,
) -> io::Result<Transition> {
    match screen {
        Screen::Welcome => welcome(ctx),
        Screen::Login => login(ctx),
        Screen::SignUp => sign_up(ctx),
        Screen::UserMenu => user_menu(ctx),
        Screen::PayPills => pay_pills(ctx),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Welcome: L logs in, S signs up, Q quits. Anything else is an error.
fn welcome<P: Presenter, I: InputSource>(
    ctx: &mut ScreenContext<'_, P, I>,
) -> io::Result<Transition> {
    ctx.presenter.clear()?;
    ctx.presenter.banner(&["Welcome To Smart Wallet"])?;
    ctx.say("Login Page", Severity::Info)?;
    ctx.presenter.line("Please Make a Selection: ")?;
    ctx.presenter.line("(S) Sign Up")?;
    ctx.presenter.line("(L) Login")?;
    ctx.presenter.line("(Q) Quit")?;

    let Some(query) = ctx.ask("==> ")? else {
        return Ok(input_closed(Screen::Welcome));
    };

    match query.as_str() {
        "L" | "l" => Ok(Transition::to(Screen::Login)),
        "S" | "s" => Ok(Transition::to(Screen::SignUp)),
        "Q" | "q" => {
            ctx.say("Goodbye!", Severity::Info)?;
            Ok(Transition::exit())
        }
        _ => ctx.reject(WalletError::InvalidSelection(query)),
    }
}

/// Login: a credential match copies the stored user into the session.
fn login<P: Presenter, I: InputSource>(
    ctx: &mut ScreenContext<'_, P, I>,
) -> io::Result<Transition> {
    ctx.presenter.clear()?;
    ctx.say("Login Page::Enter Login Credentials", Severity::Info)?;

    let Some(username) = ctx.ask("Please enter user name: ")? else {
        return Ok(input_closed(Screen::Login));
    };
    let Some(password) = ctx.ask("Enter Password: ")? else {
        return Ok(input_closed(Screen::Login));
    };

    let candidate = User::new(username, password);
    if let Some(user) = ctx.directory.find_by_credentials(&candidate) {
        info!(username = user.username(), "login succeeded");
        let greeting = format!("Welcome {}", user.username());
        ctx.presenter.clear()?;
        ctx.presenter.banner(&[greeting.as_str()])?;
        ctx.session.log_in(user);
        return Ok(Transition::to(Screen::UserMenu));
    }

    debug!(username = candidate.username(), "login failed");
    ctx.say(&WalletError::CredentialsNotFound.to_string(), Severity::Error)?;
    let Some(choice) = ctx.ask("[R]etry or [Q]uit? ")? else {
        return Ok(input_closed(Screen::Login));
    };

    if choice.starts_with(['q', 'Q']) {
        ctx.say("Login cancelled.", Severity::Warning)?;
        ctx.session.log_out();
        Ok(Transition::to(Screen::Welcome))
    } else {
        Ok(Transition::stay())
    }
}

/// SignUp: matching passwords and a valid opening balance create a user.
///
/// Login follows either way; a full directory is reported, not retried.
fn sign_up<P: Presenter, I: InputSource>(
    ctx: &mut ScreenContext<'_, P, I>,
) -> io::Result<Transition> {
    ctx.presenter.clear()?;
    ctx.say("Sign-Up Page::Enter Login Credentials", Severity::Info)?;

    let Some(username) = ctx.ask("Please enter user name: ")? else {
        return Ok(input_closed(Screen::SignUp));
    };
    let Some(password) = ctx.ask("Enter Password: ")? else {
        return Ok(input_closed(Screen::SignUp));
    };
    let Some(confirmation) = ctx.ask("Confirm Password: ")? else {
        return Ok(input_closed(Screen::SignUp));
    };

    if password != confirmation {
        ctx.say(&WalletError::PasswordMismatch.to_string(), Severity::Error)?;
        return Ok(Transition::to(Screen::SignUp));
    }

    let balance = match ctx.ask_amount("Enter Initial Balance: ")? {
        None => return Ok(input_closed(Screen::SignUp)),
        Some(Err(err)) => return ctx.reject(err),
        Some(Ok(amount)) if amount < Decimal::ZERO => {
            return ctx.reject(WalletError::InvalidAmount(amount.to_string()));
        }
        Some(Ok(amount)) => amount,
    };

    match ctx
        .directory
        .try_add(User::with_balance(username.clone(), password, balance))
    {
        Ok(()) => {
            info!(username = %username, "user signed up");
            ctx.say(
                &format!("User: {} Created Successfully", username),
                Severity::Success,
            )?;
            Ok(Transition::to(Screen::Login))
        }
        Err(err) => {
            ctx.say(&err.to_string(), Severity::Error)?;
            Ok(Transition::to(Screen::Login))
        }
    }
}

/// UserMenu: balance, withdraw, deposit, bills, logout.
///
/// Balance changes land on the session's copy of the user only.
fn user_menu<P: Presenter, I: InputSource>(
    ctx: &mut ScreenContext<'_, P, I>,
) -> io::Result<Transition> {
    let Some(balance) = ctx.session.current_user.as_ref().map(User::balance) else {
        return ctx.missing_session(Screen::UserMenu);
    };

    ctx.presenter.line("Please Make a Selection")?;
    ctx.presenter.line("[1] View balance")?;
    ctx.presenter.line("[2] Withdraw")?;
    ctx.presenter.line("[3] Deposit")?;
    ctx.presenter.line("[4] Pay Pills")?;
    ctx.presenter.line("[5] Logout")?;

    let Some(query) = ctx.ask("==> ")? else {
        return Ok(input_closed(Screen::UserMenu));
    };

    match query.as_str() {
        "1" => {
            ctx.say(
                &format!("Your Balance: {}", format_amount(balance)),
                Severity::Info,
            )?;
            Ok(Transition::stay())
        }
        "2" | "3" => {
            let withdrawing = query == "2";
            let prompt = if withdrawing {
                "Enter a value to withdraw: "
            } else {
                "Enter a value to deposit: "
            };
            let amount = match ctx.ask_amount(prompt)? {
                None => return Ok(input_closed(Screen::UserMenu)),
                Some(Err(err)) => return ctx.reject(err),
                Some(Ok(amount)) => amount,
            };
            if amount <= Decimal::ZERO {
                ctx.say("Invalid Value", Severity::Error)?;
                return Ok(Transition::stay());
            }

            let Some(user) = ctx.session.current_user.as_mut() else {
                return ctx.missing_session(Screen::UserMenu);
            };
            let (applied, verb) = if withdrawing {
                (user.withdraw(amount), "Withdrawn")
            } else {
                (user.deposit(amount), "Deposited")
            };
            match applied {
                Ok(()) => {
                    debug!(%amount, verb, "balance updated");
                    let text = format!(
                        "{} Successfully\nYour new balance: {}",
                        verb,
                        format_amount(user.balance())
                    );
                    ctx.presenter.message(&text, Severity::Success)?;
                }
                Err(err) => ctx.presenter.message(&err.to_string(), Severity::Error)?,
            }
            Ok(Transition::stay())
        }
        "4" => Ok(Transition::to(Screen::PayPills)),
        "5" => {
            ctx.say("Logged Out", Severity::Info)?;
            ctx.session.log_out();
            Ok(Transition::to(Screen::Welcome))
        }
        _ => {
            ctx.say(
                &WalletError::InvalidSelection(query).to_string(),
                Severity::Warning,
            )?;
            Ok(Transition::stay())
        }
    }
}

/// PayPills: 1 recharges a mobile, 4 goes back, anything else quits.
///
/// The recharge amount goes straight to `withdraw`; its balance check is
/// the only guard.
fn pay_pills<P: Presenter, I: InputSource>(
    ctx: &mut ScreenContext<'_, P, I>,
) -> io::Result<Transition> {
    ctx.presenter.clear()?;
    ctx.say("Pay Your Pills Here", Severity::Info)?;
    if !ctx.session.is_logged_in() {
        return ctx.missing_session(Screen::PayPills);
    }

    ctx.presenter.line("[1] Recharge Mobile")?;
    ctx.presenter.line("[2] Pay electricity pills")?;
    ctx.presenter.line("[3] Pay College Fees")?;
    ctx.presenter.line("[4] quit")?;

    let Some(query) = ctx.ask("Please Make a Selection: ")? else {
        return Ok(input_closed(Screen::PayPills));
    };

    match query.as_str() {
        "1" => {
            let Some(number) = ctx.ask("Enter Mobile Number: ")? else {
                return Ok(input_closed(Screen::PayPills));
            };
            let amount = match ctx.ask_amount("Enter Recharge Amount: ")? {
                None => return Ok(input_closed(Screen::PayPills)),
                Some(Err(err)) => return ctx.reject(err),
                Some(Ok(amount)) => amount,
            };

            let Some(user) = ctx.session.current_user.as_mut() else {
                return ctx.missing_session(Screen::PayPills);
            };
            match user.withdraw(amount) {
                Ok(()) => {
                    debug!(%number, %amount, "mobile recharge");
                    let text = format!(
                        "{} Recharged with amount {} Successfully",
                        number,
                        format_amount(amount)
                    );
                    ctx.presenter.message(&text, Severity::Success)?;
                }
                Err(err) => ctx.presenter.message(&err.to_string(), Severity::Error)?,
            }
            Ok(Transition::stay())
        }
        "4" => Ok(Transition::to(Screen::UserMenu)),
        _ => {
            debug!(selection = %query, "leaving from bill payments");
            Ok(Transition::exit())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
