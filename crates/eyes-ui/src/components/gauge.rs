use leptos::prelude::*;

const SIZE: f32 = 112.0;
const STROKE_WIDTH: f32 = 10.0;
/// The arc covers 240 of the circle's 360 degrees.
const ARC_DEGREES: f32 = 240.0;
/// Start the arc at bottom-left.
const ROTATION: f32 = 150.0;

pub fn progress_color(percent: u8) -> &'static str {
    if percent >= 100 {
        "#16a34a"
    } else if percent >= 50 {
        "#0ea5e9"
    } else {
        "#f59e0b"
    }
}

/// Checklist completion as an SVG arc, drawn with stroke-dasharray.
#[component]
pub fn ProgressGauge(percent: u8, #[prop(into)] label: String) -> impl IntoView {
    let radius = (SIZE - STROKE_WIDTH) / 2.0;
    let center = SIZE / 2.0;
    let circumference = 2.0 * std::f32::consts::PI * radius;
    let arcLength = circumference * (ARC_DEGREES / 360.0);

    let clamped = percent.min(100);
    let filledLength = arcLength * (clamped as f32 / 100.0);

    let trackDash = format!("{arcLength} {}", circumference - arcLength);
    let fillDash = format!("{filledLength} {circumference}");
    let upright = format!("rotate({} {center} {center})", -ROTATION);

    view! {
        <div class="gauge-container">
            <svg
                width=format!("{SIZE}")
                height=format!("{SIZE}")
                viewBox=format!("0 0 {SIZE} {SIZE}")
                class="gauge-svg"
                style=format!("transform: rotate({ROTATION}deg)")
            >
                <circle
                    cx=format!("{center}")
                    cy=format!("{center}")
                    r=format!("{radius}")
                    class="gauge-bg"
                    stroke-width=format!("{STROKE_WIDTH}")
                    stroke-dasharray=trackDash
                />
                <circle
                    cx=format!("{center}")
                    cy=format!("{center}")
                    r=format!("{radius}")
                    class="gauge-fill"
                    stroke=progress_color(clamped)
                    stroke-width=format!("{STROKE_WIDTH}")
                    stroke-dasharray=fillDash
                />
                <text
                    x=format!("{center}")
                    y=format!("{}", center + 6.0)
                    class="gauge-text gauge-value"
                    transform=upright
                >
                    {format!("{clamped}%")}
                </text>
            </svg>
            <span class="gauge-label">{label}</span>
        </div>
    }
}
