//! Regex patterns shared by the fragment rules and capture decoding.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // DD.MM.YYYY, ASCII digits only
    pub static ref CARD_DATE: Regex = Regex::new(
        r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$"
    ).unwrap();

    // Looser date shape used when re-padding an already selected date
    pub static ref DATE_PARTS: Regex = Regex::new(
        r"^([0-9]{1,2})\.([0-9]{1,2})\.([0-9]+)$"
    ).unwrap();

    // Card number: series of 1-2 capitals followed by exactly 6 digits
    pub static ref CARD_NUMBER: Regex = Regex::new(
        r"^[A-Z]{1,2}[0-9]{6}$"
    ).unwrap();

    // data:<mime>[;param]*,<payload>
    pub static ref DATA_URL: Regex = Regex::new(
        r"(?s)^data:([^;,]*)((?:;[^;,]*)*),(.*)$"
    ).unwrap();
}
