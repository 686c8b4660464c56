use console::Style;
use drift_core::pipeline::{BatchConfig, BatchSummary};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_batch_summary(config: &BatchConfig, summary: &BatchSummary) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Drift Correction"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Candidates"),
        s.path.apply_to(config.directory.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("References"),
        s.path.apply_to(config.standard.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Loaded"),
        s.value.apply_to(summary.references_loaded)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Log"),
        s.path.apply_to(summary.log_path.display())
    );
    println!();

    if summary.hours.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Hours"),
            s.disabled.apply_to("no matching files")
        );
    } else {
        println!("  {}", s.header.apply_to("Hours"));
        for hour in &summary.hours {
            let skipped = if hour.skipped.is_empty() {
                String::new()
            } else {
                format!("  ({} skipped)", hour.skipped.len())
            };
            println!(
                "    {:<12}{}{}  {}",
                s.label.apply_to(format!("{:02}00", hour.hour)),
                s.value.apply_to(format!("{} file(s)", hour.records.len())),
                s.disabled.apply_to(skipped),
                s.path.apply_to(hour.output_dir.display())
            );
        }
    }

    if !summary.skipped_hours.is_empty() {
        let hours: Vec<String> = summary
            .skipped_hours
            .iter()
            .map(|h| format!("{h:02}00"))
            .collect();
        println!(
            "    {:<12}{}",
            s.label.apply_to("No reference"),
            s.disabled.apply_to(hours.join(", "))
        );
    }
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Registered"),
        s.value.apply_to(summary.processed_count())
    );
    if summary.skipped_count() > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Skipped"),
            s.disabled.apply_to(summary.skipped_count())
        );
    }
    println!();
}
