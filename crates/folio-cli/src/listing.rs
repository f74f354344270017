use std::io;
use std::io::Write;

use folio_core::catalog::card;
use folio_core::catalog::Catalog;
use folio_core::theme::ThemeResolver;
use folio_core::theme::ThemeSource;

/// Plain-text rendering of the project listing.
pub fn write_listing(out: &mut impl Write, catalog: &Catalog, filter: Option<&str>) -> io::Result<()> {
    let projects = catalog.filter(filter);
    match filter.filter(|tag| !tag.is_empty()) {
        Some(tag) => writeln!(out, "Projects tagged \"{tag}\" ({})", projects.len())?,
        None => writeln!(out, "Projects ({})", projects.len())?,
    }
    if projects.is_empty() {
        writeln!(out)?;
        writeln!(out, "No projects match this filter.")?;
        return Ok(());
    }
    for project in projects {
        let card = card(project);
        writeln!(out)?;
        writeln!(out, "{} [{}]", project.title, project.status.label())?;
        if !project.description.is_empty() {
            writeln!(out, "  {}", project.description)?;
        }
        if !project.tags.is_empty() {
            writeln!(out, "  tags: {}", project.tags.join(", "))?;
        }
        match card.link {
            Some(link) => writeln!(out, "  -> {} ({link})", card.presentation.button_label)?,
            None => writeln!(out, "  -> {} (disabled)", card.presentation.button_label)?,
        }
    }
    Ok(())
}

pub fn write_theme_status(out: &mut impl Write, theme: &ThemeResolver) -> io::Result<()> {
    let signal = match theme.prefers_dark() {
        Some(true) => "dark",
        Some(false) => "light",
        None => "unavailable",
    };
    writeln!(out, "preference: {}", theme.preference().as_str())?;
    writeln!(out, "effective:  {}", theme.effective().as_str())?;
    writeln!(out, "system:     {signal}")
}
