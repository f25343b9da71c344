use std::io::{self, Write};

use gallery_core::{ArtworkDetailView, ArtworkId, ArtworkRow, CatalogViewModel, ImageView};

/// Incremental stdout-style renderer.
///
/// Appended rows are printed as they arrive; a list that no longer extends
/// what was printed (explicit load or jump) is printed again from a header.
pub struct Renderer<W> {
    out: W,
    shown_ids: Vec<ArtworkId>,
    shown_detail: Option<ArtworkDetailView>,
    was_loading: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_ids: Vec::new(),
            shown_detail: None,
            was_loading: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, view: &CatalogViewModel) -> io::Result<()> {
        if view.detail != self.shown_detail {
            if let Some(detail) = &view.detail {
                self.write_detail(detail)?;
            }
            self.shown_detail = view.detail.clone();
        }

        let ids: Vec<ArtworkId> = view.rows.iter().map(|row| row.id).collect();
        if !ids.starts_with(&self.shown_ids) {
            self.shown_ids.clear();
        }

        let first_new = self.shown_ids.len();
        if ids.len() > first_new {
            if first_new == 0 {
                writeln!(self.out, "\n=== Artworks ===")?;
            }
            for (index, row) in view.rows.iter().enumerate().skip(first_new) {
                self.write_row(index + 1, row)?;
            }
            self.shown_ids = ids;
            self.write_footer(view)?;
        }

        if view.is_loading && !self.was_loading {
            writeln!(self.out, "Loading...")?;
        }
        self.was_loading = view.is_loading;
        self.out.flush()
    }

    /// Print the whole list regardless of what was shown before.
    pub fn render_list(&mut self, view: &CatalogViewModel) -> io::Result<()> {
        writeln!(self.out, "\n=== Artworks ===")?;
        for (index, row) in view.rows.iter().enumerate() {
            self.write_row(index + 1, row)?;
        }
        self.shown_ids = view.rows.iter().map(|row| row.id).collect();
        self.write_footer(view)?;
        self.out.flush()
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    fn write_row(&mut self, number: usize, row: &ArtworkRow) -> io::Result<()> {
        let marker = if row.has_image { "" } else { "  (no image)" };
        writeln!(self.out, "{number:>4}. {}{marker}", row.title)
    }

    fn write_footer(&mut self, view: &CatalogViewModel) -> io::Result<()> {
        writeln!(
            self.out,
            "{} | {} artworks in catalog",
            view.page_range_label(),
            view.total_items
        )?;
        if view.has_more {
            writeln!(self.out, "-- press Enter for more --")?;
        }
        Ok(())
    }

    fn write_detail(&mut self, detail: &ArtworkDetailView) -> io::Result<()> {
        match &detail.image {
            ImageView::Unavailable => {
                writeln!(self.out, "\n--- {} ---", detail.title)?;
                writeln!(self.out, "Image is not available")
            }
            ImageView::Loading { url } => {
                writeln!(self.out, "\n--- {} ---", detail.title)?;
                writeln!(self.out, "Loading image {url} ...")
            }
            ImageView::Loaded {
                url,
                content_type,
                byte_len,
            } => {
                let kind = content_type.as_deref().unwrap_or("unknown type");
                writeln!(
                    self.out,
                    "Image: {url} ({kind}, {:.1} KB)",
                    *byte_len as f64 / 1024.0
                )
            }
            ImageView::Failed { url, message } => {
                writeln!(self.out, "Image failed to load from {url}: {message}")
            }
        }
    }
}
