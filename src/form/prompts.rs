//! Fixed user-facing texts of the request form.

use crate::form::state::FormState;

/// Label on the entry keyboard button.
pub const ENTRY_BUTTON_LABEL: &str = "Оформить заявку";

/// Greeting shown on entry, together with the one-button keyboard.
pub const GREETING: &str = "Приветствуем!\n\nЧтобы оформить заявку, нажмите кнопку ниже 👇";

pub const CARGO_PROMPT: &str = "Введите информацию о грузе:";
pub const DIMENSIONS_PROMPT: &str = "Укажите габариты груза (длина, ширина, высота, вес):";
pub const ROUTE_PROMPT: &str = "Укажите маршрут (откуда → куда):";
pub const CONTACT_PROMPT: &str = "Оставьте номер телефона или Telegram для связи:";

pub const COMPLETED: &str = "Спасибо! Ваша заявка принята. Мы свяжемся с вами в ближайшее время.";
pub const CANCELLED: &str = "Заявка отменена.";

/// The prompt emitted on entering `state`.
pub fn prompt_for(state: FormState) -> &'static str {
    match state {
        FormState::AwaitingName => GREETING,
        FormState::AwaitingCargo => CARGO_PROMPT,
        FormState::AwaitingDimensions => DIMENSIONS_PROMPT,
        FormState::AwaitingRoute => ROUTE_PROMPT,
        FormState::AwaitingContact => CONTACT_PROMPT,
    }
}
