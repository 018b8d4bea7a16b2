use once_cell::sync::Lazy;
use regex::Regex;

/// Шаблон номера телефона: необязательный "+", от 10 до 14 цифр,
/// между которыми допускаются разделители `- _():=+`
pub const PHONE_PATTERN: &str = r"(\s*)?(\+)?([- _():=+]?\d[- _():=+]?){10,14}(\s*)?";

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{})$", PHONE_PATTERN)).expect("phone pattern must compile")
});

/// Проверка одного поля
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Значение не пустое после обрезки пробелов
    Required,
    /// Длина обрезанного значения в символах, границы включительно
    Length { min: usize, max: usize },
    /// Номер телефона (полное совпадение с [`PHONE_PATTERN`])
    Phone,
}

impl Rule {
    pub fn check(&self, value: &str) -> bool {
        match *self {
            Rule::Required => !value.trim().is_empty(),
            Rule::Length { min, max } => {
                let len = value.trim().chars().count();
                len >= min && len <= max
            }
            Rule::Phone => is_valid_phone(value),
        }
    }
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers() {
        assert!(is_valid_phone("+7 (904) 330-28-66"));
        assert!(is_valid_phone("89043302866"));
        assert!(is_valid_phone("  8-904-330-28-66  "));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("+7 904 abc 28 66"));
        assert!(!is_valid_phone("123456789012345"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let rule = Rule::Length { min: 3, max: 20 };
        assert!(!rule.check("Ив"));
        assert!(rule.check("Иван"));
        assert!(rule.check(&"а".repeat(20)));
        assert!(!rule.check(&"а".repeat(21)));
    }

    #[test]
    fn length_counts_trimmed_characters() {
        let rule = Rule::Length { min: 3, max: 20 };
        assert!(!rule.check("  Ив  "));
    }

    #[test]
    fn required_rejects_blank() {
        assert!(!Rule::Required.check(""));
        assert!(!Rule::Required.check(" \t "));
        assert!(Rule::Required.check(" x "));
    }
}
