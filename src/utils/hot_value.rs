// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static WAN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*万").expect("Failed to compile hot value regex")
});

static DIGITS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("Failed to compile digits regex"));

/// 解析热榜条目的热度文本
///
/// "1829 万热度" 按万折算为 18290000，"50000" 直接取数字，
/// 其他无法识别的内容返回 0
pub fn parse_hot_value(extra: Option<&str>) -> i64 {
    let Some(text) = extra else {
        return 0;
    };

    if let Some(caps) = WAN_PATTERN.captures(text) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return (value * 10_000.0).floor() as i64;
        }
    }

    DIGITS_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wan_suffix_multiplies() {
        assert_eq!(parse_hot_value(Some("1829 万热度")), 18_290_000);
        assert_eq!(parse_hot_value(Some("502万")), 5_020_000);
    }

    #[test]
    fn test_decimal_wan_is_floored() {
        assert_eq!(parse_hot_value(Some("3.25万")), 32_500);
        assert_eq!(parse_hot_value(Some("1.00005万")), 10_000);
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(parse_hot_value(Some("50000")), 50_000);
        assert_eq!(parse_hot_value(Some("阅读 1200")), 1_200);
    }

    #[test]
    fn test_non_numeric_is_zero() {
        assert_eq!(parse_hot_value(Some("热")), 0);
        assert_eq!(parse_hot_value(Some("")), 0);
        assert_eq!(parse_hot_value(None), 0);
    }
}
