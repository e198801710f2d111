mod clock;
mod format;
mod header;
mod overlays;

pub(super) use clock::draw_main;
pub(super) use header::{draw_footer, draw_header};
pub(super) use overlays::{draw_help_popup, draw_terminal_too_small};
