use gtk::gdk;
use gtk4 as gtk;

pub const DRAWING_AREA_CLASS: &str = "ringview-area";

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.ringview-area {
    background-color: @theme_base_color;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
