/// Shows how source images of different shapes fit different terminals
///
/// Terminal cells are about twice as tall as they are wide, so every fit
/// starts by halving the source height.
use glyphcast::TermSize;
use glyphcast::fit::fit_dimensions;

fn main() {
    println!("glyphcast - terminal fit demo");
    println!("=============================\n");

    let sources = [
        (100, 100, "square"),
        (1920, 1080, "Full HD"),
        (480, 1200, "portrait"),
        (12, 3, "tiny"),
    ];
    let terminals = [TermSize::new(80, 24), TermSize::new(200, 60), TermSize::new(40, 10)];

    for (width, height, description) in sources {
        println!("{width}x{height} ({description})");
        for term in terminals {
            let (columns, rows) = fit_dimensions(width, height, term);
            println!(
                "  {:>3}x{:<3} terminal -> {:>3}x{:<3} glyphs",
                term.columns, term.rows, columns, rows
            );
        }
        println!();
    }
}
