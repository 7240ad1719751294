//! Button and helper copy for each phase, with `{name}` placeholders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Copy templates for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    pub reserve: String,
    pub closed: String,
    pub closed_helper: String,
    /// `{countdown}`
    #[serde(default = "LabelSet::default_today")]
    pub today: String,
    pub today_helper: String,
    /// `{time}`, `{countdown}`
    pub tomorrow: String,
    pub d_minus_one_helper: String,
    /// `{days}`
    pub d_day: String,
    pub scheduled: String,
    /// `{date}`
    pub scheduled_helper: String,
    /// chrono strftime pattern used for `{date}`.
    #[serde(default = "LabelSet::default_date_format")]
    pub date_format: String,
}

impl LabelSet {
    fn default_today() -> String {
        "{countdown}".to_string()
    }

    fn default_date_format() -> String {
        "%Y.%m.%d %H:%M".to_string()
    }

    #[must_use]
    pub fn korean() -> Self {
        Self {
            reserve: "예매하기".to_string(),
            closed: "예매종료".to_string(),
            closed_helper: "예매 기간이 종료되었습니다".to_string(),
            today: Self::default_today(),
            today_helper: "오늘 예매가 오픈됩니다".to_string(),
            tomorrow: "내일 {time} 오픈 · {countdown}".to_string(),
            d_minus_one_helper: "D-1 예매 오픈 안내".to_string(),
            d_day: "D-{days}".to_string(),
            scheduled: "오픈 예정".to_string(),
            scheduled_helper: "{date} 오픈".to_string(),
            date_format: Self::default_date_format(),
        }
    }

    #[must_use]
    pub fn english() -> Self {
        Self {
            reserve: "Reserve".to_string(),
            closed: "Reservation closed".to_string(),
            closed_helper: "The reservation period has ended".to_string(),
            today: Self::default_today(),
            today_helper: "Opens today".to_string(),
            tomorrow: "Tomorrow {time} · {countdown}".to_string(),
            d_minus_one_helper: "Opens in less than a day (D-1)".to_string(),
            d_day: "D-{days}".to_string(),
            scheduled: "Scheduled".to_string(),
            scheduled_helper: "Opens {date}".to_string(),
            date_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }

    /// Field name of the first blank template, if any.
    #[must_use]
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("reserve", &self.reserve),
            ("closed", &self.closed),
            ("closed_helper", &self.closed_helper),
            ("today", &self.today),
            ("today_helper", &self.today_helper),
            ("tomorrow", &self.tomorrow),
            ("d_minus_one_helper", &self.d_minus_one_helper),
            ("d_day", &self.d_day),
            ("scheduled", &self.scheduled),
            ("scheduled_helper", &self.scheduled_helper),
            ("date_format", &self.date_format),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::korean()
    }
}

/// Replaces `{key}` placeholders; unknown placeholders are left in place.
#[must_use]
pub fn render_template(template: &str, args: &BTreeMap<&str, String>) -> String {
    let mut text = template.to_string();
    for (key, value) in args {
        text = text.replace(&format!("{{{key}}}"), value);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_substituted() {
        let mut args = BTreeMap::new();
        args.insert("time", "20:00".to_string());
        args.insert("countdown", "23:59:59".to_string());
        let rendered = render_template(&LabelSet::korean().tomorrow, &args);
        assert_eq!(rendered, "내일 20:00 오픈 · 23:59:59");
    }

    #[test]
    fn unknown_placeholders_survive() {
        let rendered = render_template("D-{days} {extra}", &BTreeMap::from([("days", "3".to_string())]));
        assert_eq!(rendered, "D-3 {extra}");
    }

    #[test]
    fn builtin_sets_have_no_blank_fields() {
        assert_eq!(LabelSet::korean().first_blank_field(), None);
        assert_eq!(LabelSet::english().first_blank_field(), None);
        let mut broken = LabelSet::english();
        broken.d_day = "  ".to_string();
        assert_eq!(broken.first_blank_field(), Some("d_day"));
    }

    #[test]
    fn omitted_optional_fields_take_defaults() {
        let json = serde_json::json!({
            "reserve": "r", "closed": "c", "closed_helper": "ch",
            "today_helper": "th", "tomorrow": "t", "d_minus_one_helper": "dh",
            "d_day": "D-{days}", "scheduled": "s", "scheduled_helper": "{date}"
        });
        let labels: LabelSet = serde_json::from_value(json).unwrap();
        assert_eq!(labels.today, "{countdown}");
        assert_eq!(labels.date_format, "%Y.%m.%d %H:%M");
    }
}
