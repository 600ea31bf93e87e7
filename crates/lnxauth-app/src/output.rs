//! CLI output rendering
//!
//! Human output goes to stdout with light markers; JSON mode keeps stdout
//! machine-readable and routes everything else to stderr.

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Output {
    Human,
    Json,
}

impl Output {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Output::Json
        } else {
            Output::Human
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Output::Json)
    }

    pub fn success(&self, message: &str) {
        match self {
            Output::Human => println!("\u{2713} {}", message),
            Output::Json => println!(
                "{}",
                serde_json::json!({"success": true, "message": message})
            ),
        }
    }

    pub fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }

    pub fn info(&self, message: &str) {
        if let Output::Human = self {
            println!("  {}", message);
        }
    }

    pub fn print_json(&self, value: &serde_json::Value) {
        if let Output::Json = self {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_default()
            );
        }
    }
}
