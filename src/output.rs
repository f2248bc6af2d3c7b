//! Output formatting for search results and index statistics

use crate::index::IndexStats;
use crate::plugin::SearchResults;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print ranked hits followed by a summary line
pub fn print_results(results: &SearchResults, color: bool) -> io::Result<()> {
    let mut stdout = stdout(color);
    write_results(&mut stdout, results)
}

/// Print index statistics
pub fn print_stats(stats: &IndexStats, color: bool) -> io::Result<()> {
    let mut stdout = stdout(color);
    write_stats(&mut stdout, stats)
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)
}

pub fn write_results<W: WriteColor>(out: &mut W, results: &SearchResults) -> io::Result<()> {
    let width = results.hits.len().to_string().len();

    for (rank, hit) in results.hits.iter().enumerate() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:>width$}", rank + 1)?;
        out.reset()?;
        write!(out, " ")?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "[{}]", hit.id)?;
        out.reset()?;

        writeln!(out, " {}", hit.label)?;
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(
        out,
        "{} of {} hits in {:.3} ms",
        results.hits.len(),
        results.total_hits,
        results.took.as_secs_f64() * 1000.0
    )?;
    out.reset()?;

    Ok(())
}

pub fn write_stats<W: WriteColor>(out: &mut W, stats: &IndexStats) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "Documents: {}", stats.documents)?;
    out.reset()?;

    for field in &stats.fields {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "  {}", field.name)?;
        out.reset()?;
        writeln!(
            out,
            ": {} tokens, {} postings, {} documents",
            field.tokens, field.postings, field.documents
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FieldStats;
    use crate::plugin::SearchResultItem;
    use std::time::Duration;
    use termcolor::Buffer;

    fn render(f: impl FnOnce(&mut Buffer) -> io::Result<()>) -> String {
        let mut buffer = Buffer::no_color();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_write_results() {
        let results = SearchResults {
            total_hits: 3,
            took: Duration::from_micros(250),
            hits: vec![
                SearchResultItem::new("1", "Hamlet, 1996: To be (2.0)"),
                SearchResultItem::new("0", "Jaws, 1975: Boat (1.0)"),
            ],
        };

        let text = render(|out| write_results(out, &results));
        assert_eq!(
            text,
            "1 [1] Hamlet, 1996: To be (2.0)\n\
             2 [0] Jaws, 1975: Boat (1.0)\n\
             2 of 3 hits in 0.250 ms\n"
        );
    }

    #[test]
    fn test_write_stats() {
        let stats = IndexStats {
            documents: 2,
            fields: vec![FieldStats {
                name: "quote".to_string(),
                tokens: 5,
                postings: 6,
                documents: 2,
            }],
        };

        let text = render(|out| write_stats(out, &stats));
        assert_eq!(text, "Documents: 2\n  quote: 5 tokens, 6 postings, 2 documents\n");
    }
}
