//! Terminal output formatting.

use std::time::Duration;

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use hindsight_core::decision::model::{success_level_label, Decision};
use hindsight_core::forms::FormGroup;
use hindsight_views::nav::BRAND;
use hindsight_views::{DashboardView, NavBar};
use indicatif::{ProgressBar, ProgressStyle};
use unicode_width::UnicodeWidthStr;

/// Spinner shown while a request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn notice(message: &str) {
    println!("{} {}", "→".blue().bold(), message);
}

/// Human label for a form control name.
fn field_label(name: &str) -> &str {
    match name {
        "username" => "Username",
        "email" => "Email",
        "password" => "Password",
        "title" => "Title",
        "context" => "Context",
        "reasoning" => "Reasoning",
        "expectedOutcome" => "Expected outcome",
        "actualOutcome" => "Actual outcome",
        "successLevel" => "Success level",
        other => other,
    }
}

/// Field-level messages for every touched, invalid control.
pub fn print_form_errors(form: &FormGroup) {
    for (name, message) in form.visible_errors() {
        eprintln!("  {} {}: {}", "✗".red(), field_label(name).bold(), message);
    }
}

pub fn print_nav(nav: &NavBar) {
    let who = match (&nav.user, nav.authenticated) {
        (Some(user), true) => format!("signed in as {}", user.username).normal(),
        _ => "not signed in".dimmed(),
    };
    println!("{} {}", BRAND.cyan().bold(), who);
    let links: Vec<String> = nav
        .links()
        .iter()
        .map(|(label, route)| format!("{} {}", label, route.path().dimmed()))
        .collect();
    if !links.is_empty() {
        println!("{}", links.join("  ·  "));
    }
    println!();
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn status_badge(decision: &Decision) -> ColoredString {
    let label = pad_right(decision.status_label(), 16);
    if decision.has_outcome() {
        label.green()
    } else {
        label.yellow()
    }
}

fn analysis_badge(decision: &Decision) -> ColoredString {
    let label = pad_right(decision.analysis_label(), 13);
    if decision.has_analysis() {
        label.cyan()
    } else {
        label.dimmed()
    }
}

/// Stat cards followed by the decision table.
pub fn print_dashboard(view: &DashboardView) {
    let stats = view.stats();
    println!(
        "{} {}   {} {}   {} {}",
        stats.total.to_string().cyan().bold(),
        "Total Decisions".dimmed(),
        stats.outcomes_recorded.to_string().green().bold(),
        "Outcomes Recorded".dimmed(),
        stats.ai_analyses.to_string().magenta().bold(),
        "AI Analyses".dimmed(),
    );
    println!();

    if view.is_empty() {
        println!("{}", "No decisions recorded yet.".dimmed());
        println!(
            "Create your first decision with {}",
            "hindsight decision new".cyan()
        );
        return;
    }

    // id(24) + status(16) + analysis(13) + date(12) + gaps
    let fixed = 24 + 16 + 13 + 12 + 8;
    let title_width = term_width().saturating_sub(fixed).clamp(12, 60);

    println!(
        "{}  {}  {}  {}  {}",
        pad_right("ID", 24).bold(),
        pad_right("Title", title_width).bold(),
        pad_right("Status", 16).bold(),
        pad_right("AI", 13).bold(),
        "Created".bold()
    );
    println!("{}", "─".repeat(fixed + title_width));

    for decision in view.decisions() {
        let id = decision.id.as_deref().unwrap_or("-");
        println!(
            "{}  {}  {}  {}  {}",
            pad_right(&truncate_visual(id, 24), 24).dimmed(),
            pad_right(&truncate_visual(&decision.title, title_width), title_width),
            status_badge(decision),
            analysis_badge(decision),
            format_date(decision.created_at).dimmed()
        );
    }

    println!();
    println!("{} decision(s) total", view.decisions().len());
}

fn print_section(title: &str, body: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", body);
}

fn print_list(title: &str, items: &[String], empty: &str) {
    println!();
    println!("{}", title.bold());
    if items.is_empty() {
        println!("{}", empty.dimmed());
        return;
    }
    for item in items {
        println!("  • {}", item);
    }
}

/// Full decision page, with the actions available for its state.
pub fn print_decision(decision: &Decision) {
    let id = decision.id.as_deref().unwrap_or("-");
    println!("{} {}", decision.title.cyan().bold(), format!("({id})").dimmed());
    println!(
        "{} · {} · Created {}",
        status_badge(decision).bold(),
        analysis_badge(decision),
        format_date(decision.created_at)
    );

    print_section("Context", &decision.context);
    print_section("Reasoning", &decision.reasoning);
    print_list("Assumptions", &decision.assumptions, "No assumptions recorded.");
    print_section("Expected Outcome", &decision.expected_outcome);

    if decision.has_outcome() {
        print_section(
            "Actual Outcome",
            decision.actual_outcome.as_deref().unwrap_or_default(),
        );
        if let Some(level) = decision.success_level {
            println!(
                "{}: {}/5 {}",
                "Success Level".bold(),
                level,
                format!("({})", success_level_label(level)).dimmed()
            );
        }
        let factors = decision.unexpected_factors.as_deref().unwrap_or_default();
        if !factors.is_empty() {
            print_list("Unexpected Factors", factors, "");
        }
    }

    if let Some(analysis) = &decision.ai_analysis {
        println!();
        println!("{}", "AI Analysis".magenta().bold());
        if !analysis.comparison.is_empty() {
            print_section("Comparison", &analysis.comparison);
        }
        print_list("Invalid Assumptions", &analysis.invalid_assumptions, "None identified.");
        print_list("Lessons Learned", &analysis.lessons_learned, "None identified.");
        print_list("Suggestions", &analysis.suggestions, "None identified.");
    }

    println!();
    if decision.can_record_outcome() {
        println!(
            "{} Record the outcome: {}",
            "→".blue().bold(),
            format!("hindsight decision outcome {id}").cyan()
        );
    } else if decision.can_trigger_analysis() {
        println!(
            "{} Request an AI analysis: {}",
            "→".blue().bold(),
            format!("hindsight decision analyze {id}").cyan()
        );
    }
}
