//! Blog command handlers.

use std::io::{self, Write};

use anyhow::{Result, bail};
use folio_core::content::Portfolio;
use folio_tui::{POST_NOT_FOUND, post_lines};

pub fn run(portfolio: &Portfolio, id: Option<u32>, width: usize) -> Result<()> {
    let mut out = io::stdout().lock();
    match id {
        None => list(portfolio, &mut out),
        Some(id) => show(portfolio, id, width, &mut out),
    }
}

fn list(portfolio: &Portfolio, out: &mut impl Write) -> Result<()> {
    if portfolio.blog.is_empty() {
        writeln!(out, "No posts.")?;
        return Ok(());
    }
    for post in &portfolio.blog {
        writeln!(
            out,
            "{:>3}  {}  {} ({})",
            post.id,
            post.display_date(),
            post.title,
            post.read_time
        )?;
    }
    Ok(())
}

fn show(portfolio: &Portfolio, id: u32, width: usize, out: &mut impl Write) -> Result<()> {
    let Some(post) = portfolio.post(id) else {
        bail!("{POST_NOT_FOUND}: {id}");
    };
    for line in post_lines(Some(post), width.max(20)) {
        writeln!(out, "{}", line.plain_text().trim_end())?;
    }
    Ok(())
}
