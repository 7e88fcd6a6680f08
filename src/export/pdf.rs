use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const LINE_SPACING: f32 = 1.2;
const CELL_PAD: f32 = 5.0;

/// Raster ready for embedding: 8-bit RGB samples, zlib-compressed.
#[derive(Debug, Clone)]
pub struct PdfImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// One table row: cell texts plus an optional picture drawn in `image_col`.
#[derive(Debug, Clone, Default)]
pub struct PdfRow {
    pub cells: Vec<String>,
    pub image: Option<PdfImage>,
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_page: Option<(Ref, Ref)>,
    current_images: Vec<(String, Ref)>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,
    image_box: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        // WinAnsi keeps accented Spanish headers ("Duración") readable
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_page: None,
            current_images: Vec::new(),

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 20.0,
            image_box: 40.0,

            next_id,
            font_id,

            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Start a page; its dictionary is written in `finalize_page`, once the
    /// images it uses are known.
    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);
        self.current_page = Some((page_id, content_id));
        self.current_images.clear();

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        let Some((page_id, content_id)) = self.current_page.take() else {
            return;
        };
        let images = std::mem::take(&mut self.current_images);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);

            let mut resources = page.resources();
            resources.fonts().pair(Name(b"F1"), self.font_id);
            if !images.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, id) in &images {
                    xobjects.pair(Name(name.as_bytes()), *id);
                }
                xobjects.finish();
            }
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    /// Write the image object and register it on the current page.
    fn embed_image(&mut self, image: &PdfImage) -> String {
        let id = self.fresh_ref();
        let name = format!("Im{}", self.current_images.len() + 1);

        let mut xobject = self.pdf.image_xobject(id, &image.data);
        xobject.filter(Filter::FlateDecode);
        xobject.width(image.width as i32);
        xobject.height(image.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        xobject.finish();

        self.current_images.push((name.clone(), id));
        name
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&to_winansi(text)));
        content.end_text();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn fill_band(&self, content: &mut Content, y: f32, w: f32, h: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray);
        content.rect(self.margin, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    /// Draw one row whose cells were already wrapped by `wrap_cells`.
    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        h: f32,
        col_widths: &[f32],
        lines: &[Vec<String>],
        font_size: f32,
    ) {
        let mut x = self.margin;
        let line_h = font_size * LINE_SPACING;

        for (i, w) in col_widths.iter().enumerate() {
            let first = y + h - CELL_PAD - font_size * 0.8;
            for (n, line) in lines.get(i).into_iter().flatten().enumerate() {
                let baseline = first - n as f32 * line_h;
                self.draw_text(content, x + 4.0, baseline, font_size, line);
            }
            self.draw_cell_borders(content, x, y, *w, h);
            x += w;
        }
    }

    /// Split every cell into lines that fit its column.
    fn wrap_cells(&self, cells: &[String], col_widths: &[f32], font_size: f32) -> Vec<Vec<String>> {
        col_widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let text = cells.get(i).map(String::as_str).unwrap_or("");
                wrap_text(text, *w - 8.0, font_size)
            })
            .collect()
    }

    fn lines_height(&self, lines: &[Vec<String>], font_size: f32) -> f32 {
        let count = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
        (count as f32 * font_size * LINE_SPACING + 2.0 * CELL_PAD).max(self.row_h)
    }

    fn draw_image(&self, content: &mut Content, name: &str, image: &PdfImage, x: f32, y: f32) {
        // fit inside the square box keeping the aspect ratio
        let scale = self.image_box / (image.width.max(image.height) as f32);
        let w = image.width as f32 * scale;
        let h = image.height as f32 * scale;

        content.save_state();
        content.transform([w, 0.0, 0.0, h, x, y]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
    }

    fn compute_col_widths(&self, headers: &[&str], rows: &[PdfRow], image_col: usize) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| h.chars().count() as f32 * 6.5 + 8.0)
            .collect();

        for row in rows {
            for (i, cell) in row.cells.iter().enumerate().take(widths.len()) {
                widths[i] = (cell.chars().count() as f32 * 5.6 + 8.0).max(widths[i]);
            }
            if row.image.is_some() && image_col < widths.len() {
                widths[image_col] = widths[image_col].max(self.image_box + 4.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            // shrink only the text columns wider than their fair share
            let fair = max / widths.len() as f32;
            let fixed: f32 = widths.iter().filter(|w| **w <= fair).sum();
            let flexible: f32 = total - fixed;
            let room = (max - fixed).max(0.0);
            for w in &mut widths {
                if *w > fair && flexible > 0.0 {
                    *w *= room / flexible;
                }
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 15.0,
            self.title_font_size,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin - 35.0,
            self.font_size,
            &pg,
        );
    }

    fn row_height(&self, row: &PdfRow, lines: &[Vec<String>]) -> f32 {
        let text_h = self.lines_height(lines, self.font_size);
        if row.image.is_some() {
            text_h.max(self.image_box + 4.0)
        } else {
            text_h
        }
    }

    /// Multi-page table with title. Pictures go into column `image_col`.
    pub fn write_table(
        &mut self,
        title: &str,
        headers: &[&str],
        rows: &[PdfRow],
        image_col: usize,
    ) {
        let col_widths = self.compute_col_widths(headers, rows, image_col);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let header_lines = self.wrap_cells(&header_row, &col_widths, self.header_font_size);
        let header_h = self.lines_height(&header_lines, self.header_font_size);
        let image_x = self.margin + col_widths.iter().take(image_col).sum::<f32>();

        let mut remaining: &[PdfRow] = rows;
        let mut page_idx = 1;

        // an empty table still gets one page with the header
        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;

            y -= header_h - self.row_h;
            self.fill_band(&mut content, y, table_w, header_h, 0.87);
            self.draw_row(
                &mut content,
                y,
                header_h,
                &col_widths,
                &header_lines,
                self.header_font_size,
            );

            let mut consumed = 0;

            for (i, row) in remaining.iter().enumerate() {
                let lines = self.wrap_cells(&row.cells, &col_widths, self.font_size);
                let h = self.row_height(row, &lines);
                if y - h < self.margin && consumed > 0 {
                    break;
                }
                y -= h;

                // zebra stripe
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, h, 0.96);
                }

                self.draw_row(&mut content, y, h, &col_widths, &lines, self.font_size);

                if let Some(image) = &row.image {
                    let name = self.embed_image(image);
                    self.draw_image(&mut content, &name, image, image_x + 2.0, y + 2.0);
                }

                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }

    pub fn save(self, path: &Path) -> std::io::Result<()> {
        let bytes = self.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Encode text for a WinAnsi Type1 font; unmappable characters become '?'.
pub(crate) fn to_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E => c as u8,
            0xA0..=0xFF => c as u32 as u8,
            0x20AC => 0x80,
            _ => b'?',
        })
        .collect()
}

/// Wrap `text` into lines of at most `width` points at `size`
/// (Helvetica average glyph width). Always yields at least one line.
fn wrap_text(text: &str, width: f32, size: f32) -> Vec<String> {
    let max_chars = (width / (size * 0.5)).floor().max(1.0) as usize;
    let lines: Vec<String> = textwrap::wrap(text, max_chars)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.is_empty() { vec![String::new()] } else { lines }
}
