/// Authentication modal: login and registration forms
///
/// Validation happens synchronously here before anything is submitted;
/// only a form that passes produces an `AuthRequest` for the application
/// root to dispatch. API failures come back as inline error text.

use crate::api::RegisterPayload;
use crate::Message;
use iced::widget::{button, column, container, text, text_input};
use iced::{Alignment, Element, Length};

/// Minimum password length accepted by the registration form
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Events raised by the modal's widgets.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SwitchMode(AuthMode),
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmChanged(String),
    NameChanged(String),
    SurnameChanged(String),
    Submit,
    /// "Log in" on the registration-success interstitial
    ContinueToLogin,
}

/// A validated submission for the application root to dispatch.
#[derive(Debug, Clone)]
pub enum AuthRequest {
    Login { email: String, password: String },
    Register(RegisterPayload),
}

#[derive(Debug, Default)]
pub struct AuthModal {
    pub mode: AuthMode,
    email: String,
    password: String,
    confirm: String,
    name: String,
    surname: String,
    pub error: Option<String>,
    /// A login/register call is in flight
    pub busy: bool,
    /// Registration succeeded; show the interstitial
    pub registration_complete: bool,
}

impl Default for AuthMode {
    fn default() -> Self {
        AuthMode::Login
    }
}

impl AuthModal {
    pub fn new() -> Self {
        AuthModal::default()
    }

    /// Apply a widget event. Returns a request exactly when a valid form
    /// was submitted.
    pub fn update(&mut self, event: AuthEvent) -> Option<AuthRequest> {
        match event {
            AuthEvent::SwitchMode(mode) => {
                self.mode = mode;
                self.error = None;
                None
            }
            AuthEvent::EmailChanged(value) => {
                self.email = value;
                None
            }
            AuthEvent::PasswordChanged(value) => {
                self.password = value;
                None
            }
            AuthEvent::ConfirmChanged(value) => {
                self.confirm = value;
                None
            }
            AuthEvent::NameChanged(value) => {
                self.name = value;
                None
            }
            AuthEvent::SurnameChanged(value) => {
                self.surname = value;
                None
            }
            AuthEvent::ContinueToLogin => {
                self.registration_complete = false;
                self.mode = AuthMode::Login;
                self.password.clear();
                self.confirm.clear();
                self.error = None;
                None
            }
            AuthEvent::Submit => {
                if self.busy {
                    return None;
                }
                match self.mode {
                    AuthMode::Login => match validate_login(&self.email, &self.password) {
                        Ok(()) => Some(AuthRequest::Login {
                            email: self.email.clone(),
                            password: self.password.clone(),
                        }),
                        Err(message) => {
                            self.error = Some(message);
                            None
                        }
                    },
                    AuthMode::Register => match validate_register(
                        &self.name,
                        &self.surname,
                        &self.email,
                        &self.password,
                        &self.confirm,
                    ) {
                        Ok(()) => Some(AuthRequest::Register(RegisterPayload {
                            name: self.name.clone(),
                            surname: self.surname.clone(),
                            email: self.email.clone(),
                            password: self.password.clone(),
                        })),
                        Err(message) => {
                            self.error = Some(message);
                            None
                        }
                    },
                }
            }
        }
    }
}

pub fn view(modal: &AuthModal) -> Element<'_, Message> {
    let body: Element<Message> = if modal.registration_complete {
        registration_complete_view()
    } else {
        match modal.mode {
            AuthMode::Login => login_form(modal),
            AuthMode::Register => register_form(modal),
        }
    };

    container(body)
        .width(Length::Fixed(420.0))
        .padding(32)
        .style(container::rounded_box)
        .into()
}

fn login_form(modal: &AuthModal) -> Element<'_, Message> {
    let submit_label = if modal.busy { "Signing in..." } else { "Sign in" };

    let mut form = column![
        text("Sign in").size(24),
        field("Email", &modal.email, AuthEvent::EmailChanged, false),
        field("Password", &modal.password, AuthEvent::PasswordChanged, true),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    if let Some(error) = &modal.error {
        form = form.push(text(error).size(14).color(super::detail::ERROR_COLOR));
    }

    form.push(
        button(text(submit_label).size(16))
            .on_press(Message::Auth(AuthEvent::Submit))
            .width(Length::Fill),
    )
    .push(
        button(text("Register").size(14))
            .on_press(Message::Auth(AuthEvent::SwitchMode(AuthMode::Register)))
            .style(button::text),
    )
    .into()
}

fn register_form(modal: &AuthModal) -> Element<'_, Message> {
    let submit_label = if modal.busy {
        "Registering..."
    } else {
        "Create account"
    };

    let mut form = column![
        text("Registration").size(24),
        field("Name", &modal.name, AuthEvent::NameChanged, false),
        field("Surname", &modal.surname, AuthEvent::SurnameChanged, false),
        field("Email", &modal.email, AuthEvent::EmailChanged, false),
        field("Password", &modal.password, AuthEvent::PasswordChanged, true),
        field("Confirm password", &modal.confirm, AuthEvent::ConfirmChanged, true),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    if let Some(error) = &modal.error {
        form = form.push(text(error).size(14).color(super::detail::ERROR_COLOR));
    }

    form.push(
        button(text(submit_label).size(16))
            .on_press(Message::Auth(AuthEvent::Submit))
            .width(Length::Fill),
    )
    .push(
        button(text("I already have a password").size(14))
            .on_press(Message::Auth(AuthEvent::SwitchMode(AuthMode::Login)))
            .style(button::text),
    )
    .into()
}

fn registration_complete_view() -> Element<'static, Message> {
    column![
        text("Registration complete").size(24),
        text("Use your email and password to sign in.").size(16),
        button(text("Sign in").size(16))
            .on_press(Message::Auth(AuthEvent::ContinueToLogin))
            .width(Length::Fill),
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .into()
}

fn field<'a>(
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> AuthEvent + 'a,
    secure: bool,
) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(move |input| Message::Auth(on_input(input)))
        .secure(secure)
        .padding(10)
        .into()
}

/// Required fields plus a minimal email shape check.
fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required.".to_string());
    }
    if !is_valid_email(email) {
        return Err("Invalid email format.".to_string());
    }
    Ok(())
}

fn validate_register(
    name: &str,
    surname: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), String> {
    if name.trim().is_empty() || surname.trim().is_empty() {
        return Err("Name and surname are required.".to_string());
    }
    if !is_valid_email(email) {
        return Err("Invalid email format.".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("Password must be at least {} characters.", MIN_PASSWORD_LEN));
    }
    if password != confirm {
        return Err("Passwords must match.".to_string());
    }
    Ok(())
}

/// Just enough of an email check for a form: something before the @,
/// and a dot somewhere inside the domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.len() < 3 {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b@sub.example.org"));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@.com"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("", "secret").is_err());
        assert!(validate_login("ada@example.com", "").is_err());
        assert!(validate_login("ada@example.com", "secret").is_ok());
    }

    #[test]
    fn test_register_password_rules() {
        let ok = validate_register("Ada", "Lovelace", "ada@example.com", "secret", "secret");
        assert!(ok.is_ok());

        let short = validate_register("Ada", "Lovelace", "ada@example.com", "abc", "abc");
        assert!(short.is_err());

        let mismatch =
            validate_register("Ada", "Lovelace", "ada@example.com", "secret", "secret2");
        assert!(mismatch.is_err());
    }

    #[test]
    fn test_submit_of_invalid_form_sets_inline_error() {
        let mut modal = AuthModal::new();
        modal.update(AuthEvent::EmailChanged("not-an-email".to_string()));
        modal.update(AuthEvent::PasswordChanged("secret".to_string()));

        assert!(modal.update(AuthEvent::Submit).is_none());
        assert!(modal.error.is_some());
    }

    #[test]
    fn test_submit_of_valid_login_produces_a_request() {
        let mut modal = AuthModal::new();
        modal.update(AuthEvent::EmailChanged("ada@example.com".to_string()));
        modal.update(AuthEvent::PasswordChanged("secret".to_string()));

        match modal.update(AuthEvent::Submit) {
            Some(AuthRequest::Login { email, .. }) => assert_eq!(email, "ada@example.com"),
            other => panic!("expected a login request, got {:?}", other),
        }
    }

    #[test]
    fn test_interstitial_returns_to_a_clean_login_form() {
        let mut modal = AuthModal::new();
        modal.mode = AuthMode::Register;
        modal.registration_complete = true;
        modal.update(AuthEvent::PasswordChanged("secret".to_string()));

        modal.update(AuthEvent::ContinueToLogin);
        assert_eq!(modal.mode, AuthMode::Login);
        assert!(!modal.registration_complete);
    }
}
