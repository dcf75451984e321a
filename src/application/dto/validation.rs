// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::ArticleStatus;
use crate::domain::models::collect_batch::{BatchStatus, CollectType};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

/// 采集源 hashId：10 位字母数字
pub static HASH_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]{10}$").expect("Failed to compile hash id regex"));

/// 请求体字段统一是 camelCase，错误信息里的字段名与之对齐
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            name.extend(ch.to_uppercase());
            upper = false;
        } else {
            name.push(ch);
        }
    }
    name
}

/// 把校验错误整理成 `字段: 信息` 的列表，按字段名排序
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (wire_name(&field), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

pub fn validate_article_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<ArticleStatus>()
        .map(|_| ())
        .map_err(|_| invalid("status", "状态只能是 pending, rewritten 或 published"))
}

pub fn validate_sort_field(value: &str) -> Result<(), ValidationError> {
    match value {
        "collectTime" | "readCount" | "likeCount" => Ok(()),
        _ => Err(invalid(
            "sort_by",
            "排序字段只能是 collectTime, readCount 或 likeCount",
        )),
    }
}

pub fn validate_sort_order(value: &str) -> Result<(), ValidationError> {
    match value {
        "asc" | "desc" => Ok(()),
        _ => Err(invalid("order", "排序方向只能是 asc 或 desc")),
    }
}

/// 允许空字符串，否则必须是合法 URL
pub fn validate_url_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || url::Url::parse(value).is_ok() {
        Ok(())
    } else {
        Err(invalid("url", "无效的URL格式"))
    }
}

pub fn validate_collect_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<CollectType>()
        .map(|_| ())
        .map_err(|_| invalid("collect_type", "采集类型必须是 keyword 或 full"))
}

pub fn validate_batch_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BatchStatus>()
        .map(|_| ())
        .map_err(|_| invalid("status", "批次状态只能是 pending, running, completed 或 failed"))
}

pub fn validate_history_range(value: &str) -> Result<(), ValidationError> {
    match value {
        "today" | "week" | "month" => Ok(()),
        _ => Err(invalid("range", "时间范围只能是 today, week 或 month")),
    }
}

pub fn validate_batch_action(value: &str) -> Result<(), ValidationError> {
    match value {
        "delete" | "updateStatus" => Ok(()),
        _ => Err(invalid("action", "操作只能是 delete 或 updateStatus")),
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("blank", "不能为空"))
    } else {
        Ok(())
    }
}
