use console::Style;
use v2s_core::detection::ThresholdMethod;
use v2s_core::pipeline::PipelineConfig;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("V2S Pipeline"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.resolved_video_path().display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Artifacts"),
        s.method.apply_to(config.layout)
    );
    println!(
        "  {:<14}{} fps via {}",
        s.label.apply_to("Frames"),
        s.value.apply_to(config.frames.fps),
        s.path.apply_to(config.frames.ffmpeg_path.display())
    );

    let threshold = match config.localizer.threshold_method {
        ThresholdMethod::MeanPlusSigma => {
            format!("mean + {}\u{03c3}", config.localizer.sigma_multiplier)
        }
        ThresholdMethod::Otsu => "Otsu".to_string(),
        ThresholdMethod::Fixed(v) => format!("fixed {v}"),
    };
    println!(
        "  {:<14}{}  area {}..{} px",
        s.label.apply_to("Threshold"),
        s.method.apply_to(threshold),
        s.value.apply_to(config.localizer.min_area),
        s.value.apply_to(config.localizer.max_area)
    );
    println!(
        "  {:<14}{}x{} on {}",
        s.label.apply_to("Device"),
        s.value.apply_to(config.device.width),
        s.value.apply_to(config.device.height),
        s.path.apply_to(&config.device.device)
    );

    if config.debug_overlays {
        println!("  {:<14}{}", s.label.apply_to("Overlays"), s.method.apply_to("enabled"));
    } else {
        println!("  {:<14}{}", s.label.apply_to("Overlays"), s.disabled.apply_to("disabled"));
    }
    println!();
}
