//! Invocation script format.
//!
//! One invocation per line: the function name followed by its arguments,
//! separated by whitespace. Blank lines and lines starting with `#` are
//! ignored.
//!
//! ```text
//! # consumer c1 wants 100 units
//! CreateEnergyRequest r1 c1 100 2024-05-01T10:00:00Z
//! ```

use energy_trading::ipc::Response;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

/// Parse a script line. `None` for blank lines and comments.
pub fn parse_line(line: &str) -> Option<Invocation> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let mut words = line.split_whitespace().map(str::to_string);
    let function = words.next()?;
    Some(Invocation {
        function,
        args: words.collect(),
    })
}

/// Render a response as one output line: status, then payload or message.
pub fn format_response(response: &Response) -> String {
    if response.is_ok() {
        if response.payload.is_empty() {
            response.status.to_string()
        } else {
            format!(
                "{} {}",
                response.status,
                String::from_utf8_lossy(&response.payload)
            )
        }
    } else {
        format!("{} {}", response.status, response.message)
    }
}
