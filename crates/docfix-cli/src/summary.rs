use std::path::Path;

use console::Style;
use docfix_core::config::SessionConfig;
use docfix_core::corners::Corner;
use docfix_core::rectify::Rectified;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_rectify_summary(
    input: &Path,
    output: &Path,
    config: &SessionConfig,
    result: &Rectified,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("docfix Rectify"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(input.display()));
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    println!();

    println!("  {}", s.header.apply_to("Corners"));
    for corner in Corner::ALL {
        println!(
            "    {:<12}{}",
            s.label.apply_to(corner),
            s.value.apply_to(result.corners.get(corner))
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Strategy"),
        s.method.apply_to(config.rectify.corner_strategy)
    );
    println!();

    println!("  {}", s.header.apply_to("Output"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!(
            "{}x{}",
            result.rectification.width, result.rectification.height
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Format"),
        s.value.apply_to(result.raster.format())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Resampling"),
        s.method.apply_to(config.rectify.interpolation)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Background"),
        s.method.apply_to(config.rectify.background)
    );
    println!();
}
