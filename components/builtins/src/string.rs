//! String.prototype methods

use crate::value::{JsError, JsResult};
use regex::Regex;

/// String.prototype methods
pub struct StringPrototype;

impl StringPrototype {
    /// String.prototype.substring(start, end)
    pub fn substring(s: &str, start: usize, end: Option<usize>) -> JsResult<String> {
        let len = s.chars().count();
        let start_idx = start.min(len);
        let end_idx = end.unwrap_or(len).min(len);

        let (actual_start, actual_end) = if start_idx <= end_idx {
            (start_idx, end_idx)
        } else {
            (end_idx, start_idx)
        };

        Ok(s.chars()
            .skip(actual_start)
            .take(actual_end - actual_start)
            .collect())
    }

    /// String.prototype.slice(start, end)
    pub fn slice(s: &str, start: i32, end: Option<i32>) -> JsResult<String> {
        let len = s.chars().count() as i32;

        let start_idx = if start < 0 {
            (len + start).max(0) as usize
        } else {
            start.min(len) as usize
        };

        let end_idx = match end {
            Some(e) if e < 0 => (len + e).max(0) as usize,
            Some(e) => e.min(len) as usize,
            None => len as usize,
        };

        if start_idx >= end_idx {
            Ok(String::new())
        } else {
            Ok(s.chars()
                .skip(start_idx)
                .take(end_idx - start_idx)
                .collect())
        }
    }

    /// String.prototype.split(separator)
    pub fn split(s: &str, separator: &str) -> JsResult<Vec<String>> {
        if separator.is_empty() {
            // Split into individual characters
            Ok(s.chars().map(|c| c.to_string()).collect())
        } else {
            Ok(s.split(separator).map(|part| part.to_string()).collect())
        }
    }

    /// String.prototype.replace(search, replacement)
    pub fn replace(s: &str, search: &str, replacement: &str) -> JsResult<String> {
        Ok(s.replacen(search, replacement, 1))
    }

    /// String.prototype.match(regexp)
    pub fn match_str(s: &str, pattern: &str) -> JsResult<Vec<String>> {
        let re = Regex::new(pattern)
            .map_err(|e| JsError::syntax_error(format!("Invalid regex: {}", e)))?;

        let matches: Vec<String> = re
            .find_iter(s)
            .map(|m| m.as_str().to_string())
            .collect();

        Ok(matches)
    }

    /// String.prototype.trim()
    pub fn trim(s: &str) -> String {
        s.trim().to_string()
    }

    /// String.prototype.toLowerCase()
    pub fn to_lower_case(s: &str) -> String {
        s.to_lowercase()
    }

    /// String.prototype.toUpperCase()
    pub fn to_upper_case(s: &str) -> String {
        s.to_uppercase()
    }

    /// String.prototype.charAt(index)
    pub fn char_at(s: &str, index: usize) -> JsResult<String> {
        Ok(s.chars()
            .nth(index)
            .map(|c| c.to_string())
            .unwrap_or_default())
    }

    /// String.prototype.charCodeAt(index)
    pub fn char_code_at(s: &str, index: usize) -> JsResult<u32> {
        s.chars()
            .nth(index)
            .map(|c| c as u32)
            .ok_or_else(|| JsError::range_error("Index out of bounds"))
    }

    /// String.prototype.padStart(targetLength, padString)
    pub fn pad_start(s: &str, target_length: usize, pad_string: &str) -> String {
        let current_len = s.chars().count();
        if current_len >= target_length {
            return s.to_string();
        }

        let pad_len = target_length - current_len;
        let pad_chars: Vec<char> = pad_string.chars().collect();

        if pad_chars.is_empty() {
            return s.to_string();
        }

        let mut padding = String::new();
        let mut i = 0;
        while padding.chars().count() < pad_len {
            padding.push(pad_chars[i % pad_chars.len()]);
            i += 1;
        }

        // Truncate padding if it's too long
        let padding: String = padding.chars().take(pad_len).collect();
        format!("{}{}", padding, s)
    }

    /// String.prototype.padEnd(targetLength, padString)
    pub fn pad_end(s: &str, target_length: usize, pad_string: &str) -> String {
        let current_len = s.chars().count();
        if current_len >= target_length {
            return s.to_string();
        }

        let pad_len = target_length - current_len;
        let pad_chars: Vec<char> = pad_string.chars().collect();

        if pad_chars.is_empty() {
            return s.to_string();
        }

        let mut padding = String::new();
        let mut i = 0;
        while padding.chars().count() < pad_len {
            padding.push(pad_chars[i % pad_chars.len()]);
            i += 1;
        }

        // Truncate padding if it's too long
        let padding: String = padding.chars().take(pad_len).collect();
        format!("{}{}", s, padding)
    }

    /// String.prototype.startsWith(searchString)
    pub fn starts_with(s: &str, search_string: &str) -> bool {
        s.starts_with(search_string)
    }

    /// String.prototype.endsWith(searchString)
    pub fn ends_with(s: &str, search_string: &str) -> bool {
        s.ends_with(search_string)
    }

    /// String.prototype.includes(searchString)
    pub fn includes(s: &str, search_string: &str) -> bool {
        s.contains(search_string)
    }
}
