use crate::charts::PersonStyle;
use crate::labels::LabelPolicy;
use crate::render::{HeatmapView, SegmentView};
use crate::tooltip::TOOLTIP_OFFSET_PX;
use serde_json::Value;

/// Space between grid cells, in px. Cells take the rest of a column's width.
const CELL_GAP_PX: f64 = 2.5;

pub struct PersonPanel {
    pub style: PersonStyle,
    /// `None` when the heatmap data could not be loaded.
    pub heatmap: Option<HeatmapView>,
}

pub struct ChartPanel {
    pub id: &'static str,
    pub config: Value,
}

impl ChartPanel {
    pub fn new(id: &'static str, config: Value) -> Self {
        Self { id, config }
    }
}

pub struct DashboardPage {
    pub people: Vec<PersonPanel>,
    pub charts: Vec<ChartPanel>,
}

pub fn render_dashboard(page: &DashboardPage) -> String {
    let mut people = String::new();
    for panel in &page.people {
        people.push_str(&render_person(panel));
    }

    let mut charts = String::new();
    for chart in &page.charts {
        let config = serde_json::to_string(&chart.config)
            .unwrap_or_else(|_| "null".to_string())
            .replace("</", "<\\/");
        charts.push_str(&format!(
            r#"<div class="chart-card"><canvas id="{id}" data-chart="{id}-config"></canvas></div><script type="application/json" id="{id}-config">{config}</script>"#,
            id = chart.id,
        ));
    }

    INDEX_HTML
        .replace("{{PEOPLE}}", &people)
        .replace("{{CHARTS}}", &charts)
        .replace("{{TOOLTIP_OFFSET}}", &TOOLTIP_OFFSET_PX.to_string())
}

fn render_person(panel: &PersonPanel) -> String {
    let id = escape_html(&panel.style.id);
    let name = escape_html(&panel.style.label);

    let (stats, heatmap) = match &panel.heatmap {
        Some(view) if view.cell_count() > 0 => (render_stats(view), render_heatmap(view)),
        _ => (String::new(), String::new()),
    };

    let mut legend = String::new();
    if let Some(view) = &panel.heatmap {
        for level in &view.legend {
            legend.push_str(&format!(r#"<span class="legend-box level-{level}"></span>"#));
        }
    }

    format!(
        r#"<section class="person" data-person="{id}" style="--person: {color}">
  <h2>{name}</h2>
  <div class="stats" id="{id}-stats">{stats}</div>
  <div class="heatmap" id="{id}-heatmap" data-person="{id}">{heatmap}</div>
  <div class="legend"><span>Less</span>{legend}<span>More</span></div>
</section>
"#,
        color = escape_html(&panel.style.color),
    )
}

fn render_stats(view: &HeatmapView) -> String {
    let items = [
        ("Total Tasks", view.stats.total.to_string()),
        ("Daily Average", format!("{:.1}", view.stats.average)),
        ("Best Day", view.stats.max.to_string()),
    ];
    let mut out = String::new();
    for (label, value) in items {
        out.push_str(&format!(
            r#"<div class="stat-item"><span class="stat-label">{label}</span><span class="stat-value">{value}</span></div>"#
        ));
    }
    out
}

/// Inner HTML of a heatmap container: one wrapper per segment.
pub fn render_heatmap(view: &HeatmapView) -> String {
    let mut out = String::new();
    for segment in &view.segments {
        out.push_str(&render_segment(view, segment));
    }
    out
}

fn render_segment(view: &HeatmapView, segment: &SegmentView) -> String {
    let cell = (view.column_width_px - CELL_GAP_PX).max(1.0);

    let mut labels = String::new();
    for label in &segment.labels {
        let position = match view.label_policy {
            LabelPolicy::Cumulative => format!(
                "padding-left: {:.2}px; width: {:.2}px",
                label.pixel_offset, label.text_width
            ),
            LabelPolicy::Absolute => format!("left: {:.2}px", label.pixel_offset),
        };
        labels.push_str(&format!(
            r#"<span class="month-label" style="{position}">{}</span>"#,
            escape_html(&label.text)
        ));
    }

    let mut cells = String::new();
    for c in &segment.cells {
        cells.push_str(&format!(
            r#"<div class="heatmap-cell level-{level}" style="grid-row: {row}; grid-column: {column}" data-date="{date}" data-count="{count}" data-tooltip="{tooltip}"></div>"#,
            level = c.level,
            row = c.row + 1,
            column = c.column + 1,
            date = c.date,
            count = c.count,
            tooltip = escape_html(&c.tooltip),
        ));
    }

    let label_class = match view.label_policy {
        LabelPolicy::Cumulative => "month-labels cumulative",
        LabelPolicy::Absolute => "month-labels absolute",
    };

    format!(
        r#"<div class="segment-wrapper"><div class="{label_class}" style="{label_font}">{labels}</div><div class="heatmap-grid" style="grid-template-rows: repeat({rows}, {cell}px); grid-template-columns: repeat({columns}, {cell}px); gap: {gap}px">{cells}</div></div>"#,
        label_font = escape_html(&view.font.css()),
        rows = segment.rows,
        columns = segment.columns.max(1),
        gap = CELL_GAP_PX,
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Task Dashboard</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=PT+Serif:wght@400;700&display=swap');

    :root {
      --bg: #0f0f10;
      --card: #18181b;
      --ink: #f3f4f6;
      --muted: #9ca3af;
      --empty: #232327;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "PT Serif", Georgia, serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(1180px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .person {
      background: var(--card);
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    .person h2 {
      margin: 0;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 12px;
    }

    .stat-item {
      display: grid;
      gap: 6px;
    }

    .stat-label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat-value {
      font-size: 1.6rem;
      font-weight: 700;
    }

    .heatmap {
      overflow-x: auto;
      display: grid;
      gap: 18px;
    }

    .month-labels {
      color: var(--muted);
      white-space: nowrap;
      height: 1.4em;
      position: relative;
    }

    .month-labels.cumulative .month-label {
      display: inline-block;
      box-sizing: content-box;
      overflow: visible;
    }

    .month-labels.absolute .month-label {
      position: absolute;
    }

    .heatmap-grid {
      display: grid;
      width: max-content;
    }

    .heatmap-cell {
      border-radius: 3px;
      background: var(--empty);
    }

    .level-0 { background: var(--empty); }
    .level-1 { background: color-mix(in srgb, var(--person) 25%, var(--empty)); }
    .level-2 { background: color-mix(in srgb, var(--person) 50%, var(--empty)); }
    .level-3 { background: color-mix(in srgb, var(--person) 75%, var(--empty)); }
    .level-4 { background: var(--person); }

    .legend {
      display: flex;
      align-items: center;
      gap: 4px;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .legend-box {
      width: 12px;
      height: 12px;
      border-radius: 3px;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 20px;
    }

    .chart-card {
      background: var(--card);
      border-radius: 20px;
      padding: 16px;
      height: 360px;
    }

    #tooltip {
      position: fixed;
      display: none;
      pointer-events: none;
      background: rgba(20, 20, 20, 0.95);
      border: 1px solid rgba(255, 255, 255, 0.1);
      border-radius: 8px;
      padding: 6px 10px;
      font-size: 0.85rem;
      z-index: 10;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Task Dashboard</h1>
    </header>
    {{PEOPLE}}
    <section class="charts">{{CHARTS}}</section>
  </main>
  <div id="tooltip"></div>

  <script>
    const tooltip = document.getElementById('tooltip');
    const TOOLTIP_OFFSET = {{TOOLTIP_OFFSET}};

    const placeTooltip = (event) => {
      tooltip.style.left = `${event.clientX + TOOLTIP_OFFSET}px`;
      tooltip.style.top = `${event.clientY + TOOLTIP_OFFSET}px`;
    };

    // One set of listeners per heatmap container; cells are replaced on resize.
    document.querySelectorAll('.heatmap').forEach((container) => {
      container.addEventListener('mouseover', (event) => {
        const cell = event.target.closest('.heatmap-cell');
        if (!cell) return;
        tooltip.textContent = cell.dataset.tooltip;
        tooltip.style.display = 'block';
        placeTooltip(event);
      });
      container.addEventListener('mousemove', (event) => {
        if (event.target.closest('.heatmap-cell')) placeTooltip(event);
      });
      container.addEventListener('mouseout', (event) => {
        if (event.target.closest('.heatmap-cell')) tooltip.style.display = 'none';
      });
    });

    document.querySelectorAll('canvas[data-chart]').forEach((canvas) => {
      const source = document.getElementById(canvas.dataset.chart);
      if (!source || typeof Chart === 'undefined') return;
      try {
        new Chart(canvas, JSON.parse(source.textContent));
      } catch (err) {
        console.error('Failed to draw chart', canvas.id, err);
      }
    });

    const rerender = async () => {
      for (const container of document.querySelectorAll('.heatmap[data-person]')) {
        const grid = container.querySelector('.heatmap-grid');
        if (!grid) continue;
        const columns = grid.style.gridTemplateColumns.match(/repeat\((\d+)/);
        if (!columns) continue;
        const width = Math.max(8, Math.min(24, container.clientWidth / Number(columns[1])));
        const person = encodeURIComponent(container.dataset.person);
        try {
          const res = await fetch(`/heatmap/${person}?column_width=${width.toFixed(2)}`);
          if (!res.ok) throw new Error(`HTTP ${res.status}`);
          container.innerHTML = await res.text();
        } catch (err) {
          console.error('Failed to re-render heatmap', err);
        }
      }
    };

    let resizeTimer = null;
    window.addEventListener('resize', () => {
      clearTimeout(resizeTimer);
      resizeTimer = setTimeout(rerender, 250);
    });
  </script>
</body>
</html>
"#;
