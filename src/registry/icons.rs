//! Icon set registered into the component registry at startup.

use std::sync::Arc;

use askama::Template;

use crate::registry::components::{Component, ComponentRegistry, Props};

/// Every exported icon: component name and SVG path data (1024×1024 grid).
pub const ICONS: &[(&str, &str)] = &[
    ("Bell", "M512 96a320 320 0 0 1 320 320v256l96 96v32H96v-32l96-96V416A320 320 0 0 1 512 96zm-96 768h192a96 96 0 0 1-192 0z"),
    ("DataAnalysis", "M128 128h768v576H128zm64 64v448h640V192zm96 384V384h64v192zm160 0V288h64v288zm160 0V448h64v128zM320 768h384v64H320z"),
    ("Document", "M224 64h416l192 192v704H224zm64 64v768h480V288H608V128zm96 320h256v64H384zm0 160h256v64H384z"),
    ("Histogram", "M128 896V128h64v704h704v64zm128-128V448h128v320zm192 0V256h128v512zm192 0V512h128v256z"),
    ("HomeFilled", "M512 128l384 320v448H640V640H384v256H128V448z"),
    ("InfoFilled", "M512 64a448 448 0 1 1 0 896 448 448 0 0 1 0-896zm-32 224v64h64v-64zm0 160v288h64V448z"),
    ("List", "M704 192h160v704H160V192h160v64h384zm-384 256v64h384v-64zm0 192v64h384v-64zM384 128h256v128H384z"),
    ("Monitor", "M96 160h832v512H96zm64 64v384h704V224zm192 576h320v64H352zm128-128h64v128h-64z"),
    ("PieChart", "M448 68.5V576h507.5A448 448 0 1 1 448 68.5zm64-4.5a448 448 0 0 1 448 448H512z"),
    ("Refresh", "M771.8 794.9A384 384 0 0 1 128 512h64a320 320 0 0 0 536.6 235.2L640 658.8V896h237.2zM252.2 229.1A384 384 0 0 1 896 512h-64a320 320 0 0 0-536.6-235.2l88.6 88.4H128V128z"),
    ("Search", "M795.9 750.7L960 914.7 914.7 960 750.7 795.9a416 416 0 1 1 45.2-45.2zM480 832a352 352 0 1 0 0-704 352 352 0 0 0 0 704z"),
    ("Setting", "M600.7 64l27.4 110.7 97.8 56.4 109.6-32.2 88.7 153.6-82.2 78.6v112.6l82.2 78.6-88.7 153.6-109.6-32.2-97.8 56.4L600.7 960H423.3l-27.4-110.7-97.8-56.4-109.6 32.2-88.7-153.6 82.2-78.6V455.8l-82.2-78.6 88.7-153.6 109.6 32.2 97.8-56.4L423.3 64zM512 384a128 128 0 1 0 0 256 128 128 0 0 0 0-256z"),
    ("TrendCharts", "M128 896V128h64v704h704v64zm168.4-232.6L480 480l160 160 224-288 50.6 39.2L646 736 480 570 341.6 708.6z"),
    ("Warning", "M512 64a448 448 0 1 1 0 896 448 448 0 0 1 0-896zm0 832a384 384 0 0 0 0-768 384 384 0 0 0 0 768zm-32-640h64v384h-64zm0 448h64v64h-64z"),
    ("WarningFilled", "M512 64a448 448 0 1 1 0 896 448 448 0 0 1 0-896zm-32 192v384h64V256zm0 448v64h64v-64z"),
];

/// An SVG icon. Props: `size` in pixels (default 18).
#[derive(Debug)]
pub struct Icon {
    name: &'static str,
    path: &'static str,
}

impl Icon {
    pub fn new(name: &'static str, path: &'static str) -> Self {
        Self { name, path }
    }

    pub fn name(&self) -> &str {
        self.name
    }
}

#[derive(Template)]
#[template(path = "widgets/icon.html")]
struct IconTemplate<'a> {
    name: &'a str,
    path: &'a str,
    size: u32,
}

impl Component for Icon {
    fn render(&self, props: &Props, _children: &str) -> askama::Result<String> {
        IconTemplate {
            name: self.name,
            path: self.path,
            size: props
                .get("size")
                .and_then(|s| s.parse().ok())
                .unwrap_or(18),
        }
        .render()
    }
}

/// Register every exported icon under its name. Returns the number registered.
pub fn register_icons(registry: &mut ComponentRegistry) -> usize {
    let count = registry.register_all(
        ICONS
            .iter()
            .map(|&(name, path)| (name, Arc::new(Icon::new(name, path)) as Arc<dyn Component>)),
    );
    tracing::debug!(icons = count, "Icons registered");
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_icon_names_unique() {
        let names: HashSet<&str> = ICONS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), ICONS.len());
    }

    #[test]
    fn test_register_all_icons() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(register_icons(&mut registry), ICONS.len());

        for icon in ["DataAnalysis", "List", "Monitor", "TrendCharts", "InfoFilled"] {
            assert!(registry.contains(icon), "missing {}", icon);
        }
    }

    #[test]
    fn test_icon_render_size() {
        let icon = Icon::new("List", "M0 0z");
        let mut props = Props::new();
        props.insert("size".into(), "24".into());

        let html = icon.render(&props, "").unwrap();
        assert!(html.contains(r#"width="24""#));
        assert!(html.contains("icon-List"));
        assert!(icon
            .render(&Props::new(), "")
            .unwrap()
            .contains(r#"height="18""#));
    }
}
