//! Email-safe post-processing.
//!
//! Many mail clients drop `<style>` blocks, so rules are moved onto each
//! matching element's `style` attribute. The heavy lifting is done by
//! `css-inline`, built without its remote-stylesheet loader.

use crate::error::{Error, Result};

/// Inline every `<style>` rule into element `style` attributes.
pub fn inline_css(html: &str) -> Result<String> {
    css_inline::inline(html).map_err(|e| Error::Generate(format!("CSS inlining failed: {e}")))
}
