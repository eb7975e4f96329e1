//! Report generation tools
//!
//! Render an analysis run as two PNG charts and a PDF report.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::*;
use printpdf::image_crate::{DynamicImage, ImageFormat, RgbImage};
use serde::Serialize;

use crate::models::Nutrient;
use crate::nutrition::TargetProgress;
use crate::tools::analysis::{format_amount, truncate_name, AggregateReport, AnalysisRun};

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_TITLE: (u8, u8, u8) = (112, 48, 160);       // Purple for title
const COLOR_MET: (u8, u8, u8) = (0, 176, 80);           // Green
const COLOR_BELOW: (u8, u8, u8) = (0, 112, 192);        // Blue
const COLOR_WARNING: (u8, u8, u8) = (255, 165, 0);      // Orange
const COLOR_REFERENCE: (u8, u8, u8) = (255, 0, 0);      // Red
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);

/// Bar colors for the macronutrient chart
const MACRO_PALETTE: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const CHART_FONT: &str = "sans-serif";

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub file_path: String,
    pub foods_analyzed: usize,
    pub foods_skipped: usize,
    pub age_group: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChartFiles {
    pub macronutrients: String,
    pub micronutrients: String,
}

// ============================================================================
// Chart Generation (plotters)
// ============================================================================

/// Upper bound of the percent axis: room above the 100% line and the tallest bar
pub fn percent_axis_max(rows: &[TargetProgress]) -> f64 {
    let tallest = rows.iter().map(|p| p.percent).fold(0.0, f64::max);
    tallest.max(100.0) * 1.3
}

fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, String> {
    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

/// Macronutrient totals as horizontal bars, PNG bytes
pub fn generate_macro_chart(report: &AggregateReport, width: u32, height: u32) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    let macros = report.macro_totals();
    let slots = macros.len() as f64;
    let largest = macros.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let x_max = if largest > 0.0 { largest * 1.15 } else { 1.0 };

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Macronutrients (Total Amount)", (CHART_FONT, 22))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(10)
            .build_cartesian_2d(0f64..x_max, 0f64..slots)
            .map_err(|e| e.to_string())?;

        chart.configure_mesh()
            .disable_y_mesh()
            .y_labels(0)
            .x_desc("Amount")
            .draw()
            .map_err(|e| e.to_string())?;

        // First nutrient in the top slot
        for (i, (nutrient, value)) in macros.iter().enumerate() {
            let slot_top = slots - i as f64;
            let (r, g, b) = MACRO_PALETTE[i % MACRO_PALETTE.len()];

            chart.draw_series(std::iter::once(Rectangle::new(
                [(0.0, slot_top - 0.95), (*value, slot_top - 0.45)],
                RGBColor(r, g, b).filled(),
            ))).map_err(|e| e.to_string())?;

            let label = if *value > 0.0 {
                format!("{}: {:.1}", nutrient.label(), value)
            } else {
                nutrient.label()
            };
            chart.draw_series(std::iter::once(Text::new(
                label,
                (x_max * 0.005, slot_top - 0.08),
                (CHART_FONT, 15).into_font(),
            ))).map_err(|e| e.to_string())?;
        }

        root.present().map_err(|e| e.to_string())?;
    }

    encode_png(buffer, width, height)
}

/// Micronutrient percent-of-target as vertical bars with a 100% line, PNG bytes
pub fn generate_micro_chart(report: &AggregateReport, width: u32, height: u32) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    let rows = &report.target_percentages;
    if rows.is_empty() {
        return Err("No data to chart".to_string());
    }

    let slots = rows.len() as f64;
    let y_max = percent_axis_max(rows);

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Micronutrients vs. Daily Recommendation", (CHART_FONT, 22))
            .margin(20)
            .x_label_area_size(10)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..slots, 0f64..y_max)
            .map_err(|e| e.to_string())?;

        chart.configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc("% of Daily Recommendation")
            .draw()
            .map_err(|e| e.to_string())?;

        for (i, progress) in rows.iter().enumerate() {
            let left = i as f64;
            let (r, g, b) = if progress.is_met() { COLOR_MET } else { COLOR_BELOW };

            chart.draw_series(std::iter::once(Rectangle::new(
                [(left + 0.15, 0.0), (left + 0.85, progress.percent)],
                RGBColor(r, g, b).mix(0.8).filled(),
            ))).map_err(|e| e.to_string())?;

            let lines = [
                progress.nutrient.label(),
                format!("{:.1}%", progress.percent),
                format!("(Rec: {})", format_amount(progress.target)),
            ];
            for (line_no, text) in lines.into_iter().enumerate() {
                let y = progress.percent + y_max * (0.16 - 0.05 * line_no as f64);
                chart.draw_series(std::iter::once(Text::new(
                    text,
                    (left + 0.12, y),
                    (CHART_FONT, 13).into_font(),
                ))).map_err(|e| e.to_string())?;
            }
        }

        // 100% reference line
        let (r, g, b) = COLOR_REFERENCE;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 100.0), (slots, 100.0)],
            ShapeStyle::from(&RGBColor(r, g, b)).stroke_width(2),
        )))
        .map_err(|e| e.to_string())?
        .label("100% Target")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RGBColor(r, g, b).stroke_width(2)));

        chart.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    encode_png(buffer, width, height)
}

/// Write both charts as PNG files into `dir`
pub fn save_charts(run: &AnalysisRun, dir: &Path) -> Result<ChartFiles, String> {
    std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;

    let macro_path = dir.join("macronutrients.png");
    let micro_path = dir.join("micronutrients.png");

    let macro_png = generate_macro_chart(&run.report, 1000, 500)?;
    std::fs::write(&macro_path, macro_png).map_err(|e| e.to_string())?;

    let micro_png = generate_micro_chart(&run.report, 1000, 600)?;
    std::fs::write(&micro_path, micro_png).map_err(|e| e.to_string())?;

    tracing::info!("Charts written to {}", dir.display());

    Ok(ChartFiles {
        macronutrients: macro_path.display().to_string(),
        micronutrients: micro_path.display().to_string(),
    })
}

// ============================================================================
// PDF Generation Helper Functions
// ============================================================================

fn rgb_to_printpdf(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.use_text(text, size, x, y, font);
}

fn add_line(
    layer: &PdfLayerReference,
    x1: Mm,
    y1: Mm,
    x2: Mm,
    y2: Mm,
    color: (u8, u8, u8),
    width: f32,
) {
    layer.set_outline_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.set_outline_thickness(width);

    let line = Line {
        points: vec![
            (Point::new(x1, y1), false),
            (Point::new(x2, y2), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn embed_chart(
    layer: &PdfLayerReference,
    png_bytes: &[u8],
    x: f32,
    y: f32,
) -> Result<(), String> {
    let dynamic_image = printpdf::image_crate::load_from_memory(png_bytes)
        .map_err(|e| e.to_string())?;
    let pdf_image = Image::from_dynamic_image(&dynamic_image);

    // 1000x360 pixels at 120 DPI = ~212mm x 76mm
    let transform = ImageTransform {
        translate_x: Some(Mm(x)),
        translate_y: Some(Mm(y)),
        dpi: Some(120.0),
        ..Default::default()
    };
    pdf_image.add_to_layer(layer.clone(), transform);
    Ok(())
}

/// Default PDF location inside `dir`, stamped with the current local time
pub fn default_report_path(dir: &Path, now: chrono::DateTime<chrono::Local>) -> PathBuf {
    dir.join(format!("prenatal-diet-{}.pdf", now.format("%Y%m%d-%H%M%S")))
}

// ============================================================================
// Diet Report Generation
// ============================================================================

const PAGE_WIDTH: f32 = 215.9;   // Letter width
const PAGE_HEIGHT: f32 = 279.4;  // Letter height
const MARGIN_LEFT: f32 = 12.0;
const MARGIN_BOTTOM: f32 = 20.0;

/// Generate the diet analysis PDF report
pub fn generate_diet_report(run: &AnalysisRun, output_path: &str) -> Result<GenerateReportResponse, String> {
    let report = &run.report;

    let (doc, page1, layer1) = PdfDocument::new(
        "Prenatal Diet Analysis",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let font = doc.add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| e.to_string())?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = PAGE_HEIGHT - 20.0;

    // Title
    add_text(&layer, &font_bold, "Prenatal Diet Analysis", Mm(MARGIN_LEFT), Mm(y), 18.0, COLOR_TITLE);
    y -= 10.0;

    add_text(&layer, &font, &format!("Age group: {} years", report.age_group), Mm(MARGIN_LEFT), Mm(y), 11.0, COLOR_BLACK);
    let now = chrono::Local::now().format("%Y-%m-%d").to_string();
    add_text(&layer, &font, &format!("Generated: {}", now), Mm(120.0), Mm(y), 11.0, COLOR_BLACK);
    y -= 6.0;

    add_text(&layer, &font, "Source: USDA FoodData Central. All values are per 100 g of the food product.", Mm(MARGIN_LEFT), Mm(y), 9.0, COLOR_GRAY);
    y -= 6.0;

    add_line(&layer, Mm(MARGIN_LEFT), Mm(y), Mm(PAGE_WIDTH - MARGIN_LEFT), Mm(y), COLOR_GRAY, 0.5);
    y -= 8.0;

    // Skipped foods
    if !run.warnings.is_empty() {
        add_text(&layer, &font_bold, "Skipped Foods", Mm(MARGIN_LEFT), Mm(y), 12.0, COLOR_BLACK);
        y -= 6.0;
        for warning in &run.warnings {
            add_text(&layer, &font, &warning.message, Mm(MARGIN_LEFT), Mm(y), 9.0, COLOR_WARNING);
            y -= 5.0;
        }
        y -= 4.0;
    }

    // Nutritional values table
    add_text(&layer, &font_bold, "Nutritional Values Table", Mm(MARGIN_LEFT), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;

    let col_widths = [8.0, 52.0, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0];
    let headers = [
        "#", "Food", "kcal", "Prot g", "Fat g", "Fiber g", "Sugar g",
        "Ca mg", "Fe mg", "Mg mg", "D mcg", "B12 mcg",
    ];

    let mut col_x = MARGIN_LEFT;
    for (i, header) in headers.iter().enumerate() {
        add_text(&layer, &font_bold, header, Mm(col_x), Mm(y), 8.0, COLOR_BLACK);
        col_x += col_widths[i];
    }
    y -= 5.0;

    let mut table_rows: Vec<(String, String, Vec<String>, bool)> = report
        .rows()
        .map(|(i, record)| {
            let values = Nutrient::ALL
                .iter()
                .map(|n| format!("{:.1}", record.get(*n)))
                .collect();
            (i.to_string(), truncate_name(&record.name, 32), values, false)
        })
        .collect();
    table_rows.push((
        String::new(),
        "Total".to_string(),
        Nutrient::ALL.iter().map(|n| format!("{:.1}", report.totals.get(*n))).collect(),
        true,
    ));

    for (index, name, values, is_total) in &table_rows {
        if y < MARGIN_BOTTOM {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table Page");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT - 20.0;
        }

        let row_font = if *is_total { &font_bold } else { &font };
        col_x = MARGIN_LEFT;
        add_text(&layer, row_font, index, Mm(col_x), Mm(y), 7.0, COLOR_BLACK);
        col_x += col_widths[0];
        add_text(&layer, row_font, name, Mm(col_x), Mm(y), 7.0, COLOR_BLACK);
        col_x += col_widths[1];
        for (i, value) in values.iter().enumerate() {
            add_text(&layer, row_font, value, Mm(col_x), Mm(y), 7.0, COLOR_BLACK);
            col_x += col_widths[i + 2];
        }
        y -= 4.5;
    }
    y -= 8.0;

    // Micronutrient targets
    if y < MARGIN_BOTTOM + 40.0 {
        let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Targets Page");
        layer = doc.get_page(page).get_layer(page_layer);
        y = PAGE_HEIGHT - 20.0;
    }

    add_text(&layer, &font_bold, "Micronutrients vs. Daily Recommendation", Mm(MARGIN_LEFT), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;

    for progress in &report.target_percentages {
        let color = if progress.is_met() { COLOR_MET } else { COLOR_BLACK };
        add_text(&layer, &font, &progress.nutrient.label(), Mm(MARGIN_LEFT), Mm(y), 10.0, COLOR_BLACK);
        add_text(&layer, &font, &format!("{:.1}%", progress.percent), Mm(70.0), Mm(y), 10.0, color);
        add_text(&layer, &font, &format!("Rec: {}", format_amount(progress.target)), Mm(100.0), Mm(y), 10.0, COLOR_GRAY);
        y -= 6.0;
    }

    // ========================================================================
    // Landscape page for both charts
    // ========================================================================
    let (chart_page, chart_layer) = doc.add_page(Mm(PAGE_HEIGHT), Mm(PAGE_WIDTH), "Chart Page");
    let chart_layer = doc.get_page(chart_page).get_layer(chart_layer);
    let mut y2 = PAGE_WIDTH - 20.0;

    add_text(&chart_layer, &font_bold, "Charts", Mm(15.0), Mm(y2), 16.0, COLOR_TITLE);
    y2 -= 8.0;

    let charts = [
        generate_macro_chart(report, 1000, 360),
        generate_micro_chart(report, 1000, 360),
    ];
    for chart in charts {
        match chart {
            Ok(png_bytes) => {
                embed_chart(&chart_layer, &png_bytes, 15.0, y2 - 76.0)?;
                y2 -= 82.0;
            }
            Err(e) => {
                add_text(&chart_layer, &font, &format!("Chart generation error: {}", e), Mm(15.0), Mm(y2 - 10.0), 9.0, COLOR_REFERENCE);
                y2 -= 15.0;
            }
        }
    }

    add_text(&chart_layer, &font, "Red line: 100% of daily recommendation. Green bars meet or exceed the target.", Mm(15.0), Mm(y2 - 4.0), 9.0, COLOR_GRAY);

    // Save PDF
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let file = File::create(path).map_err(|e| e.to_string())?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| e.to_string())?;

    tracing::info!("Diet report written to {}", output_path);

    let foods_analyzed = report.table.len();
    Ok(GenerateReportResponse {
        success: true,
        file_path: output_path.to_string(),
        foods_analyzed,
        foods_skipped: run.warnings.len(),
        age_group: report.age_group.to_string(),
        message: format!("Diet report generated for {} foods", foods_analyzed),
    })
}
