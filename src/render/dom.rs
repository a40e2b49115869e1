//! DOM renderer for the browser build.
//!
//! The page may provide the elements below by id; any that are missing are
//! created inside a `#viewer` container appended to `<body>`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use super::ViewModel;

/// Attribute carrying the 0-based image index on each jump button.
pub const JUMP_INDEX_ATTR: &str = "data-index";

/// Handles to every element the viewer writes into.
pub struct DomView {
    document: Document,
    meta: Element,
    image: HtmlImageElement,
    caption: Element,
    prev_button: HtmlElement,
    next_button: HtmlElement,
    jump_strip: Element,
    page_button: HtmlElement,
    page_label: Element,
    shuffle_button: HtmlElement,
    descriptors: Element,
    class_section: HtmlElement,
    class_descriptors: Element,
}

fn to_html(element: Element) -> Result<HtmlElement, JsValue> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("Element is not an HtmlElement"))
}

impl DomView {
    /// Find or create the viewer's elements in `document`.
    pub fn mount(document: Document) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("No body in document"))?;
        let root = ensure(&document, &body, "div", "viewer", None)?;

        let meta = ensure(&document, &root, "div", "meta", Some("Loading..."))?;
        let image = ensure(&document, &root, "img", "image", None)?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| JsValue::from_str("#image is not an <img>"))?;
        let caption = ensure(&document, &root, "div", "caption", None)?;

        let controls = ensure(&document, &root, "div", "controls", None)?;
        let prev_button = to_html(ensure(&document, &controls, "button", "prev", Some("Prev"))?)?;
        let jump_strip = ensure(&document, &controls, "div", "jump-strip", None)?;
        let next_button = to_html(ensure(&document, &controls, "button", "next", Some("Next"))?)?;
        let page_button =
            to_html(ensure(&document, &controls, "button", "page-advance", Some("More"))?)?;
        let page_label = ensure(&document, &controls, "span", "page-label", None)?;
        let shuffle_button =
            to_html(ensure(&document, &controls, "button", "shuffle", Some("Shuffle"))?)?;

        ensure(&document, &root, "h3", "descriptors-title", Some("Descriptors"))?;
        let descriptors = ensure(&document, &root, "ul", "descriptors", None)?;

        let class_section = to_html(ensure(&document, &root, "section", "class-section", None)?)?;
        ensure(
            &document,
            &class_section,
            "h3",
            "class-descriptors-title",
            Some("Also seen in this class"),
        )?;
        let class_descriptors = ensure(&document, &class_section, "ul", "class-descriptors", None)?;

        Ok(Self {
            document,
            meta,
            image,
            caption,
            prev_button,
            next_button,
            jump_strip,
            page_button,
            page_label,
            shuffle_button,
            descriptors,
            class_section,
            class_descriptors,
        })
    }

    /// The document the view lives in.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Previous-image button.
    pub fn prev_button(&self) -> &HtmlElement {
        &self.prev_button
    }

    /// Next-image button.
    pub fn next_button(&self) -> &HtmlElement {
        &self.next_button
    }

    /// Container of the numbered jump buttons.
    pub fn jump_strip(&self) -> &Element {
        &self.jump_strip
    }

    /// Page-advance button.
    pub fn page_button(&self) -> &HtmlElement {
        &self.page_button
    }

    /// Shuffle button.
    pub fn shuffle_button(&self) -> &HtmlElement {
        &self.shuffle_button
    }

    /// Write a message into the status line.
    pub fn show_status(&self, message: &str) {
        self.meta.set_text_content(Some(message));
    }

    /// Draw a view model. Drawing the same model twice gives the same page.
    pub fn render(&self, vm: &ViewModel) -> Result<(), JsValue> {
        self.meta.set_text_content(Some(&vm.meta));
        self.image.set_src(&vm.image_src);
        self.image.set_alt(&vm.meta);
        self.caption.set_text_content(Some(&vm.image_caption));

        self.jump_strip.set_inner_html("");
        let mut active: Option<Element> = None;
        for button in &vm.jump_buttons {
            let el = self.document.create_element("button")?;
            el.set_text_content(Some(&button.label));
            el.set_attribute(JUMP_INDEX_ATTR, &button.index.to_string())?;
            el.set_class_name(if button.active { "jump active" } else { "jump" });
            self.jump_strip.append_child(&el)?;
            if button.active {
                active = Some(el);
            }
        }
        if let Some(el) = active {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Nearest);
            opts.set_inline(ScrollLogicalPosition::Nearest);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
        }

        self.page_button.set_hidden(!vm.multiple_pages);
        self.page_label.set_text_content(Some(&vm.page_label));
        self.shuffle_button.set_hidden(!vm.shuffle_enabled);

        self.fill_list(&self.descriptors, &vm.descriptor_rows)?;
        match &vm.class_rows {
            Some(rows) => {
                self.class_section.set_hidden(false);
                self.fill_list(&self.class_descriptors, rows)?;
            }
            None => self.class_section.set_hidden(true),
        }

        Ok(())
    }

    fn fill_list(&self, list: &Element, rows: &[String]) -> Result<(), JsValue> {
        list.set_inner_html("");
        for row in rows {
            let item = self.document.create_element("li")?;
            item.set_text_content(Some(row));
            list.append_child(&item)?;
        }
        Ok(())
    }
}

/// Get the element with `id`, creating it under `parent` if the page lacks it.
fn ensure(
    document: &Document,
    parent: &Element,
    tag: &str,
    id: &str,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    if let Some(existing) = document.get_element_by_id(id) {
        return Ok(existing);
    }
    let el = document.create_element(tag)?;
    el.set_id(id);
    if text.is_some() {
        el.set_text_content(text);
    }
    parent.append_child(&el)?;
    Ok(el)
}
