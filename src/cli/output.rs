//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the delve CLI.

use crate::types::{FindingRecord, ResearchRun};
use delve_vector::Neighbor;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the delve banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n   {} {}\n",
                "delve".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\n   delve v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [CREATED] {} {}", file_type, path);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Print one finding with its confidence
    pub fn finding(&self, finding: &FindingRecord) {
        let score = format!("{:.2}", finding.confidence);
        if self.colored {
            println!(
                "\n  {} {} {}",
                "📖".dimmed(),
                finding.title.bright_white().bold(),
                format!("[{}]", score).color(confidence_color(finding.confidence))
            );
            println!("     {}", finding.url.dimmed());
        } else {
            println!("\n  [SOURCE] {} [{}]", finding.title, score);
            println!("     {}", finding.url);
        }
        for note in finding.summary.split("\n\n") {
            println!("     {}", note);
        }
    }

    /// Print a full research run
    pub fn research_run(&self, run: &ResearchRun) {
        self.header(&run.synthesis.title);
        println!("  {}", run.synthesis.abstract_text);

        self.subheader("Sub-questions");
        for sub_query in &run.sub_queries {
            self.list_item(sub_query);
        }

        self.subheader("Key Findings");
        if run.findings.is_empty() {
            self.warning("No findings were produced");
        }
        for finding in &run.findings {
            self.finding(finding);
        }

        if !run.synthesis.references.is_empty() {
            self.subheader("References");
            for reference in &run.synthesis.references {
                println!("{}", reference);
            }
        }

        if !run.failures.is_empty() {
            self.subheader("Recovered failures");
            for failure in &run.failures {
                self.warning(&format!(
                    "{} [{}] {}: {}",
                    failure.stage,
                    failure.sub_query,
                    if failure.url.is_empty() { "-" } else { &failure.url },
                    failure.message
                ));
            }
        }

        self.newline();
        self.kv("run", &run.id.to_string());
        self.kv("duration", &format!("{} ms", run.duration_ms));
    }

    /// Print recalled memory records, nearest first
    pub fn neighbors(&self, neighbors: &[Neighbor]) {
        if neighbors.is_empty() {
            self.warning("No relevant memory found yet.");
            return;
        }
        for neighbor in neighbors {
            let record = &neighbor.record;
            if self.colored {
                println!(
                    "\n  {} {} {}",
                    "🔎".dimmed(),
                    record.query.bright_white().bold(),
                    format!("(distance {:.4})", neighbor.distance).dimmed()
                );
                println!("     {}", record.source_url.dimmed());
            } else {
                println!(
                    "\n  [MEMORY] {} (distance {:.4})",
                    record.query, neighbor.distance
                );
                println!("     {}", record.source_url);
            }
            for note in record.summary.split("\n\n") {
                println!("     {}", note);
            }
        }
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}

fn confidence_color(confidence: f64) -> owo_colors::AnsiColors {
    if confidence >= 0.5 {
        owo_colors::AnsiColors::Green
    } else if confidence >= 0.3 {
        owo_colors::AnsiColors::Yellow
    } else {
        owo_colors::AnsiColors::Red
    }
}
