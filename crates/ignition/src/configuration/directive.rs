//! Known configuration directives and how each one is applied.

use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;
use strum::{Display, EnumString};

use super::Settings;
use crate::error::BootstrapFailure;

/// Directives understood by [`DirectiveProcessor`](super::DirectiveProcessor).
///
/// # Example
///
/// ```
/// use std::str::FromStr;
///
/// use ignition::Directive;
///
/// let directive = Directive::from_str("reply_timeout_ms").expect("known directive");
/// assert_eq!(directive, Directive::ReplyTimeoutMs);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Directive {
    /// Milliseconds to wait for a reply.
    ReplyTimeoutMs,
    /// Milliseconds between keep-alive probes.
    KeepAliveIntervalMs,
    /// Components to start, appended in order.
    Startup,
    /// Features to disable.
    Disabled,
}

pub(super) fn apply(
    settings: &mut Settings,
    name: &str,
    value: &Value,
) -> Result<(), BootstrapFailure> {
    let directive = Directive::from_str(name).map_err(|_| BootstrapFailure::UnknownDirective {
        name: name.to_owned(),
    })?;
    let invalid = |message: &str| BootstrapFailure::InvalidDirective {
        name: name.to_owned(),
        message: message.to_owned(),
    };
    match directive {
        Directive::ReplyTimeoutMs => {
            settings.reply_timeout = positive_millis(value).ok_or_else(|| invalid(POSITIVE))?;
        }
        Directive::KeepAliveIntervalMs => {
            settings.keep_alive_interval =
                positive_millis(value).ok_or_else(|| invalid(POSITIVE))?;
        }
        Directive::Startup => {
            let names = string_list(value).ok_or_else(|| invalid(STRING_LIST))?;
            settings.startup.extend(names);
        }
        Directive::Disabled => {
            let names = string_list(value).ok_or_else(|| invalid(STRING_LIST))?;
            settings.disabled.extend(names);
        }
    }
    Ok(())
}

const POSITIVE: &str = "expected a positive integer";
const STRING_LIST: &str = "expected an array of non-empty strings";

fn positive_millis(value: &Value) -> Option<Duration> {
    value
        .as_u64()
        .filter(|millis| *millis > 0)
        .map(Duration::from_millis)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| {
            item.as_str()
                .filter(|name| !name.trim().is_empty())
                .map(str::to_owned)
        })
        .collect()
}
