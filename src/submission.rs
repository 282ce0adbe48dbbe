//! A completed form submission and its outbound projections.

use crate::form::state::Field;
use crate::telegram::types::User;

/// Placeholder shown when the submitter has no username.
const NO_HANDLE: &str = "—";

/// Who submitted the form, captured from the final message only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterIdentity {
    /// First and last name joined, possibly empty.
    pub display_name: String,
    /// `@username`, or a placeholder when absent.
    pub handle: String,
}

impl SubmitterIdentity {
    pub fn of(user: &User) -> Self {
        let display_name = format!(
            "{} {}",
            user.first_name,
            user.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();
        let handle = user
            .username
            .as_deref()
            .map(|u| format!("@{u}"))
            .unwrap_or_else(|| NO_HANDLE.to_string());
        Self {
            display_name,
            handle,
        }
    }
}

/// The five answers plus the submitter. Derived at completion,
/// projected into the admin summary and the two CRM payloads,
/// never stored.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub cargo: String,
    pub dimensions: String,
    pub route: String,
    pub contact: String,
    pub submitter: SubmitterIdentity,
}

impl Submission {
    /// Assemble from recorded answers. Returns `None` if any of the
    /// five fields is missing, which the walk invariant rules out.
    pub fn from_answers(answers: &[(Field, String)], submitter: SubmitterIdentity) -> Option<Self> {
        let field = |want: Field| {
            answers
                .iter()
                .find(|(f, _)| *f == want)
                .map(|(_, v)| v.clone())
        };
        Some(Self {
            name: field(Field::Name)?,
            cargo: field(Field::Cargo)?,
            dimensions: field(Field::Dimensions)?,
            route: field(Field::Route)?,
            contact: field(Field::Contact)?,
            submitter,
        })
    }

    /// Human-readable summary sent to the admin chat.
    pub fn admin_summary(&self) -> String {
        format!(
            "Новая заявка на перевозку 🚚\n\n\
             Имя клиента: {}\n\
             Telegram: {} ({})\n\
             Груз: {}\n\
             Габариты: {}\n\
             Маршрут: {}\n\
             Контакт: {}",
            self.name,
            self.submitter.display_name,
            self.submitter.handle,
            self.cargo,
            self.dimensions,
            self.route,
            self.contact,
        )
    }

    /// Comments blob for the CRM contact card.
    pub fn contact_comments(&self) -> String {
        format!(
            "Груз: {}\nГабариты: {}\nМаршрут: {}\nTelegram: {} ({})",
            self.cargo,
            self.dimensions,
            self.route,
            self.submitter.display_name,
            self.submitter.handle,
        )
    }

    /// Comments blob for the CRM deal.
    pub fn deal_comments(&self) -> String {
        format!(
            "Груз: {}\nГабариты: {}\nКонтакт: {}\nTelegram: {} ({})",
            self.cargo,
            self.dimensions,
            self.contact,
            self.submitter.display_name,
            self.submitter.handle,
        )
    }

    pub fn deal_title(&self) -> String {
        format!("Перевозка: {}", self.route)
    }
}
