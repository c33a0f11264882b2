use rpage::reader::errors::SurfaceError;
use rpage::reader::{Measurement, NodeOffset, RenderSurface, TextProbe, highlight_ranges};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Render,
    WaitForImages,
    AppendFiller,
    ScrollTo(f64),
    SetVisible(bool),
    SetHeight(f64),
}

/// A surface laying out text proportionally over a fixed scroll width.
///
/// The scroll width of a chapter is looked up by a marker contained in its markup.
/// Text nodes are spread across that width according to their length.
#[derive(Debug)]
pub struct MockSurface {
    pub client_width: f64,
    pub margin: f64,
    /// Width added by [`RenderSurface::append_filler`].
    pub filler_width: f64,
    pub widths: Vec<(&'static str, f64)>,
    pub fail_render: bool,
    pub calls: Vec<Call>,
    pub markup: String,
    pub stylesheet: String,
    pub scroll_left: f64,
    pub visible: bool,
    pub highlighted: Vec<String>,
    scroll_width: f64,
}

impl MockSurface {
    /// Pages are `100` wide with a column gap of `20`.
    pub fn new() -> Self {
        Self {
            client_width: 100.0,
            margin: 10.0,
            filler_width: 60.0,
            widths: vec![
                ("<title>Loomings</title>", 340.0),
                ("<title>The Carpet-Bag</title>", 180.0),
                ("<title>The Spouter-Inn</title>", 100.0),
            ],
            fail_render: false,
            calls: Vec::new(),
            markup: String::new(),
            stylesheet: String::new(),
            scroll_left: 0.0,
            visible: true,
            highlighted: Vec::new(),
            scroll_width: 0.0,
        }
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    fn body(&self) -> &str {
        self.markup
            .find("<body")
            .map_or(self.markup.as_str(), |start| &self.markup[start..])
    }
}

impl RenderSurface for MockSurface {
    fn viewport_width(&self) -> f64 {
        self.client_width
    }

    fn render(&mut self, markup: &str, stylesheet: &str) -> Result<(), SurfaceError> {
        if self.fail_render {
            return Err("surface detached".into());
        }
        self.calls.push(Call::Render);
        self.markup = markup.to_owned();
        self.stylesheet = stylesheet.to_owned();
        self.scroll_width = self
            .widths
            .iter()
            .find(|(marker, _)| markup.contains(marker))
            .map_or(0.0, |(_, width)| *width);
        Ok(())
    }

    fn wait_for_images(&mut self) {
        self.calls.push(Call::WaitForImages);
    }

    fn measure(&self) -> Measurement {
        Measurement {
            client_width: self.client_width,
            margin_left: self.margin,
            margin_right: self.margin,
            scroll_width: self.scroll_width,
            scroll_height: self.scroll_width * 2.0,
        }
    }

    fn append_filler(&mut self) {
        self.calls.push(Call::AppendFiller);
        self.scroll_width += self.filler_width;
    }

    fn scroll_to(&mut self, offset: f64) {
        self.calls.push(Call::ScrollTo(offset));
        self.scroll_left = offset;
    }

    fn set_visible(&mut self, visible: bool) {
        self.calls.push(Call::SetVisible(visible));
        self.visible = visible;
    }

    fn set_height(&mut self, height: f64) {
        self.calls.push(Call::SetHeight(height));
    }
}

impl TextProbe for MockSurface {
    fn text_nodes(&self) -> Vec<String> {
        self.body()
            .split('<')
            .filter_map(|piece| piece.split_once('>'))
            .map(|(_, text)| text.to_owned())
            .filter(|text| !text.is_empty())
            .collect()
    }

    fn measure_node(&mut self, index: usize) -> Option<NodeOffset> {
        let nodes = self.text_nodes();
        let total = nodes.iter().map(|node| node.chars().count()).sum::<usize>();
        let preceding = nodes
            .get(..index)?
            .iter()
            .map(|node| node.chars().count())
            .sum::<usize>();

        Some(NodeOffset {
            top: index as f64 * 10.0,
            left: preceding as f64 / total.max(1) as f64 * self.scroll_width,
            element_id: None,
        })
    }

    fn highlight(&mut self, query: &str) -> usize {
        self.highlighted.push(query.to_owned());
        self.text_nodes()
            .iter()
            .map(|node| highlight_ranges(node, query).len())
            .sum()
    }
}
