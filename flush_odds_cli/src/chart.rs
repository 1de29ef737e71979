use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use tui::backend::{Backend, CrosstermBackend};
use tui::style::{Color, Modifier, Style};
use tui::symbols;
use tui::text::{Span, Spans};
use tui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use tui::{Frame, Terminal};

use flush_odds_core::SimulationReport;

pub const TITLE: &str = "Flush Probability Simulation";
const LEGEND: &str = "P(flush) %";

/// 把概率序列转换为 (试验序号, 概率) 的点，序号从 1 开始
pub fn points(series: &[f64]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(i, &p)| ((i + 1) as f64, p))
        .collect()
}

/// y 轴上限：最大值留 20% 余量，至少 1%，全零的序列也能画出来
pub fn y_upper_bound(series: &[f64]) -> f64 {
    let max = series.iter().copied().fold(0.0, f64::max);
    (max * 1.2).max(1.0)
}

/// 在整个画面上绘制收敛曲线
pub fn draw<B: Backend>(f: &mut Frame<B>, report: &SimulationReport, points: &[(f64, f64)]) {
    let x_max = report.trials.max(2) as f64;
    let y_max = y_upper_bound(&report.series);
    let axis_style = Style::default().fg(Color::Gray);

    let datasets = vec![
        Dataset::default()
            .name(LEGEND)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(points),
    ];

    let title = Spans::from(vec![
        Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" (按任意键退出)"),
    ]);

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("抽牌次数")
                .style(axis_style)
                .bounds([1.0, x_max])
                .labels(vec![
                    Span::raw("1"),
                    Span::raw(format!("{}", report.trials / 2)),
                    Span::raw(format!("{}", report.trials)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("同花概率 (%)")
                .style(axis_style)
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0.00"),
                    Span::raw(format!("{:.2}", y_max / 2.0)),
                    Span::raw(format!("{:.2}", y_max)),
                ]),
        );

    f.render_widget(chart, f.size());
}

/// 在备用屏幕中显示图表，按任意键后恢复终端
pub fn show(report: &SimulationReport) -> io::Result<()> {
    let points = points(&report.series);

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = draw_until_key(&mut terminal, report, &points);

    // 无论绘制是否出错都要恢复终端
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn draw_until_key<B: Backend>(
    terminal: &mut Terminal<B>,
    report: &SimulationReport,
    points: &[(f64, f64)],
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, report, points))?;
        // 窗口大小变化等其他事件只需重绘
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
