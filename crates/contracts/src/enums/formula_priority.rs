use serde::{Deserialize, Serialize};

/// Приоритет рецепта. Порядок вариантов задаёт порядок в списках выбора.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaPriority {
    Immediate,
    Urgent,
    Normal,
}

impl FormulaPriority {
    /// Получить код приоритета (хранится в БД)
    pub fn code(&self) -> &'static str {
        match self {
            FormulaPriority::Immediate => "immediate",
            FormulaPriority::Urgent => "urgent",
            FormulaPriority::Normal => "normal",
        }
    }

    /// Английское название
    pub fn name(&self) -> &'static str {
        match self {
            FormulaPriority::Immediate => "Immediate",
            FormulaPriority::Urgent => "Urgent",
            FormulaPriority::Normal => "Normal",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaPriority::Immediate => "Немедленный",
            FormulaPriority::Urgent => "Срочный",
            FormulaPriority::Normal => "Нормальный",
        }
    }

    /// Получить все приоритеты в порядке отображения
    pub fn all() -> Vec<FormulaPriority> {
        vec![
            FormulaPriority::Immediate,
            FormulaPriority::Urgent,
            FormulaPriority::Normal,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "immediate" => Some(FormulaPriority::Immediate),
            "urgent" => Some(FormulaPriority::Urgent),
            "normal" => Some(FormulaPriority::Normal),
            _ => None,
        }
    }

    /// Разбор кода, английского или русского названия без учёта регистра
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::all().into_iter().find(|p| {
            p.code() == value
                || p.name().to_lowercase() == value
                || p.display_name().to_lowercase() == value
        })
    }

    /// Совпадение со строкой фильтра: подстрока любого из названий
    pub fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        self.code().contains(&filter)
            || self.name().to_lowercase().contains(&filter)
            || self.display_name().to_lowercase().contains(&filter)
    }
}

impl std::fmt::Display for FormulaPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_any_label() {
        assert_eq!(FormulaPriority::parse("Normal"), Some(FormulaPriority::Normal));
        assert_eq!(FormulaPriority::parse("срочный"), Some(FormulaPriority::Urgent));
        assert_eq!(FormulaPriority::parse(" immediate "), Some(FormulaPriority::Immediate));
        assert_eq!(FormulaPriority::parse("later"), None);
    }

    #[test]
    fn code_round_trip() {
        for p in FormulaPriority::all() {
            assert_eq!(FormulaPriority::from_code(p.code()), Some(p));
        }
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&FormulaPriority::Urgent).unwrap();
        assert_eq!(json, "\"urgent\"");
    }
}
