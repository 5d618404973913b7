//! Turning debug-style call arguments into a record.
//!
//! A call is either structured (first argument is an object or an error,
//! followed by a message) or formatted (everything becomes one message).
//! Formatting follows the printf conventions of the debug ecosystem:
//! `%s %d %i %f %j %o %O %c %%`.

use std::error::Error as StdError;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::sink::Fields;

/// An error captured as a call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Messages of the error's sources, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<String>,
}

impl ErrorValue {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            chain: Vec::new(),
        }
    }

    /// Capture an error and its source chain.
    pub fn from_error<E: StdError>(err: &E) -> Self {
        let kind = short_type_name(std::any::type_name::<E>());
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(inner) = source {
            chain.push(inner.to_string());
            source = inner.source();
        }
        Self {
            kind,
            message: err.to_string(),
            chain,
        }
    }
}

fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// One argument of a debug call.
#[derive(Debug, Clone, PartialEq)]
pub enum DebugArg {
    Text(String),
    Value(Value),
    Error(ErrorValue),
}

impl DebugArg {
    pub fn error<E: StdError>(err: &E) -> Self {
        DebugArg::Error(ErrorValue::from_error(err))
    }

    /// `util.inspect`-like rendering used for surplus and `%o` arguments.
    fn inspect(&self) -> String {
        match self {
            DebugArg::Text(s) => s.clone(),
            DebugArg::Value(Value::String(s)) => s.clone(),
            DebugArg::Value(v) => v.to_string(),
            DebugArg::Error(e) => format!("{}: {}", e.kind, e.message),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            DebugArg::Text(s) | DebugArg::Value(Value::String(s)) => s.trim().parse().ok(),
            DebugArg::Value(Value::Number(n)) => n.as_f64(),
            DebugArg::Value(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    fn to_json(&self) -> String {
        match self {
            DebugArg::Text(s) => Value::from(s.as_str()).to_string(),
            DebugArg::Value(v) => v.to_string(),
            DebugArg::Error(e) => serde_json::to_string(e).unwrap_or_default(),
        }
    }
}

impl From<&str> for DebugArg {
    fn from(s: &str) -> Self {
        DebugArg::Text(s.to_string())
    }
}

impl From<String> for DebugArg {
    fn from(s: String) -> Self {
        DebugArg::Text(s)
    }
}

impl From<Value> for DebugArg {
    fn from(v: Value) -> Self {
        DebugArg::Value(v)
    }
}

impl From<ErrorValue> for DebugArg {
    fn from(e: ErrorValue) -> Self {
        DebugArg::Error(e)
    }
}

macro_rules! from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for DebugArg {
            fn from(v: $t) -> Self {
                DebugArg::Value(Value::from(v))
            }
        })*
    };
}

from_scalar!(bool, i32, i64, u32, u64, usize, f64);

/// How a call is turned into a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// Object-first or error-first call: fields pass through.
    Structured { fields: Fields, message: String },
    /// Everything formatted into one message.
    Formatted { message: String },
}

impl Call {
    pub fn from_args(args: Vec<DebugArg>) -> Self {
        let structured = args.len() > 1
            && matches!(args[0], DebugArg::Value(Value::Object(_)) | DebugArg::Error(_));
        if !structured {
            return Call::Formatted {
                message: format_message(&args),
            };
        }

        let mut args = args.into_iter();
        let fields = match args.next() {
            Some(DebugArg::Value(Value::Object(map))) => map,
            Some(DebugArg::Error(err)) => {
                let mut fields = Fields::new();
                fields.insert("err".into(), serde_json::to_value(&err).unwrap_or(Value::Null));
                fields
            }
            _ => Fields::new(),
        };
        let rest: Vec<DebugArg> = args.collect();
        Call::Structured {
            fields,
            message: format_message(&rest),
        }
    }

    pub fn into_parts(self) -> (Fields, String) {
        match self {
            Call::Structured { fields, message } => (fields, message),
            Call::Formatted { message } => (Fields::new(), message),
        }
    }
}

/// Format arguments into one message.
pub fn format_message(args: &[DebugArg]) -> String {
    let Some(first) = args.first() else {
        return String::new();
    };

    let (mut out, consumed) = match first {
        DebugArg::Text(template) => substitute(template, &args[1..]),
        other => (other.inspect(), 0),
    };

    for arg in &args[1 + consumed..] {
        out.push(' ');
        out.push_str(&arg.inspect());
    }
    out
}

/// Expand placeholders in `template`. Returns the text and how many of
/// `args` were consumed.
fn substitute(template: &str, args: &[DebugArg]) -> (String, usize) {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(&spec) = chars.peek() else {
            out.push('%');
            break;
        };
        if spec == '%' {
            chars.next();
            out.push('%');
            continue;
        }
        if !"sdifjoOc".contains(spec) {
            out.push('%');
            continue;
        }
        let Some(arg) = args.get(next) else {
            out.push('%');
            continue;
        };
        chars.next();
        next += 1;

        match spec {
            's' | 'o' | 'O' => out.push_str(&arg.inspect()),
            'j' => out.push_str(&arg.to_json()),
            'd' | 'f' => match arg.as_number() {
                Some(n) => {
                    let _ = write!(out, "{n}");
                }
                None => out.push_str("NaN"),
            },
            'i' => match arg.as_number() {
                Some(n) => {
                    let _ = write!(out, "{}", n.trunc());
                }
                None => out.push_str("NaN"),
            },
            // %c carries CSS in browsers; consumed and dropped.
            _ => {}
        }
    }

    (out, next)
}

/// Build a `Vec<DebugArg>` from mixed argument types.
#[macro_export]
macro_rules! debug_args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::DebugArg::from($arg)),*]
    };
}
