use std::path::{Path, PathBuf};

use console::Style;
use mockup_core::codec::SourceImage;
use mockup_core::config::{
    ModelGender, StudioConfig, BACKGROUND_STYLES, BODY_TYPES, ETHNICITIES, POSE_STYLES,
    PRODUCT_TYPES,
};
use mockup_core::consts::{MAX_VARIATIONS, MIN_VARIATIONS};
use mockup_core::session::{SessionState, SlotState};
use mockup_core::viewport::ViewerState;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    busy: Style,
    error: Style,
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
            busy: Style::new().yellow(),
            error: Style::new().red().bold(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_generate_summary(studio: &StudioConfig, source: &SourceImage, output: &Path) {
    let s = Styles::new();
    let m = &studio.mockup;

    print_title(&s, "Mockup Studio");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Product"),
        s.path.apply_to(&source.name)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Model"),
        s.value.apply_to(&studio.client.model)
    );
    println!();

    println!("  {}", s.header.apply_to("Scene"));
    for (label, value) in [
        ("Product type", m.product_type.as_str()),
        ("Gender", m.model_gender.as_str()),
        ("Ethnicity", m.ethnicity.as_str()),
        ("Body type", m.body_type.as_str()),
        ("Pose", m.pose_style.as_str()),
        ("Background", m.background_style.as_str()),
        ("Vibe", m.vibe_keywords.as_str()),
    ] {
        println!("    {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
    }
    println!(
        "    {:<14}{}",
        s.label.apply_to("Variations"),
        s.value.apply_to(m.variations)
    );
    println!();
}

pub fn print_saved(paths: &[PathBuf]) {
    let s = Styles::new();
    println!();
    println!("  {}", s.header.apply_to("Saved"));
    for (i, path) in paths.iter().enumerate() {
        println!(
            "    {}. {}",
            s.label.apply_to(i + 1),
            s.path.apply_to(path.display())
        );
    }
    println!();
}

pub fn print_choices() {
    let s = Styles::new();

    print_title(&s, "Mockup Options");

    let genders: Vec<&str> = ModelGender::ALL.iter().map(|g| g.as_str()).collect();
    for (header, options) in [
        ("Product type", PRODUCT_TYPES),
        ("Gender", genders.as_slice()),
        ("Ethnicity", ETHNICITIES),
        ("Body type", BODY_TYPES),
        ("Pose", POSE_STYLES),
        ("Background", BACKGROUND_STYLES),
    ] {
        println!("  {}", s.header.apply_to(header));
        for option in options {
            println!("    {}", s.value.apply_to(option));
        }
        println!();
    }

    println!(
        "  {:<14}{}",
        s.header.apply_to("Variations"),
        s.value.apply_to(format!("{MIN_VARIATIONS}-{MAX_VARIATIONS}"))
    );
    println!(
        "  {:<14}{}",
        s.header.apply_to("Vibe"),
        s.disabled.apply_to("free text, comma-separated")
    );
    println!();
}

/// The grid surface: one line per slot plus the session error, if any.
pub fn print_grid(state: &SessionState) {
    let s = Styles::new();

    println!(
        "  {:<10}{}",
        s.label.apply_to("Status"),
        s.value.apply_to(state.status)
    );

    if state.results.is_empty() {
        for (i, slot) in state.slots.iter().enumerate() {
            let marker = match slot.state {
                SlotState::Pending => s.busy.apply_to("generating"),
                SlotState::Ready => s.value.apply_to("ready"),
                SlotState::Errored => s.error.apply_to("failed"),
            };
            println!("    {}. {}", s.label.apply_to(i + 1), marker);
        }
    }

    for (i, result) in state.results.iter().enumerate() {
        let first_line = result.prompt.lines().next().unwrap_or_default();
        let busy = if state.is_regenerating(result.id) {
            s.busy.apply_to(" (regenerating)").to_string()
        } else {
            String::new()
        };
        println!(
            "    {}. {} rev {}{}  {}",
            s.label.apply_to(i + 1),
            s.value.apply_to(result.id),
            result.revision,
            busy,
            s.label.apply_to(truncate(first_line, 60))
        );
    }

    if let Some(ref err) = state.error {
        println!("  {}", s.error.apply_to(&err.message));
    }
}

pub fn print_viewer(viewer: &ViewerState, revision: u32) {
    let s = Styles::new();
    let t = viewer.transform();
    let image = viewer.image_size();
    let container = viewer.container();
    println!(
        "  {} rev {}  {} {:.0}%  {} ({:+.0}, {:+.0})  {} {}x{} in {}x{}{}",
        s.value.apply_to(viewer.result_id()),
        revision,
        s.label.apply_to("zoom"),
        t.scale * 100.0,
        s.label.apply_to("pan"),
        t.offset_x,
        t.offset_y,
        s.label.apply_to("image"),
        image.width,
        image.height,
        container.width,
        container.height,
        if viewer.is_dragging() { " [dragging]" } else { "" }
    );
}

pub fn print_error(message: &str) {
    let s = Styles::new();
    println!("  {}", s.error.apply_to(message));
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    cut
}
