//! Global component registry and the builtin UI widgets.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use askama::Template;

use crate::views::RenderError;

/// Text properties passed to a component.
pub type Props = BTreeMap<String, String>;

/// Something the shell can render by name.
pub trait Component: Send + Sync + fmt::Debug {
    /// Render with text props and already-rendered child markup.
    fn render(&self, props: &Props, children: &str) -> askama::Result<String>;
}

/// Name → component map consulted while rendering pages.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, Arc<dyn Component>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component, replacing any previous one under that name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        component: Arc<dyn Component>,
    ) -> Option<Arc<dyn Component>> {
        let name = name.into();
        let previous = self.components.insert(name.clone(), component);
        if previous.is_some() {
            tracing::warn!(component = %name, "Component registered twice, replacing");
        }
        previous
    }

    /// Register every entry of a name → component mapping. Returns the count.
    pub fn register_all<I, N>(&mut self, components: I) -> usize
    where
        I: IntoIterator<Item = (N, Arc<dyn Component>)>,
        N: Into<String>,
    {
        let mut count = 0;
        for (name, component) in components {
            self.register(name, component);
            count += 1;
        }
        count
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Component>> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Render a registered component by name.
    pub fn render(&self, name: &str, props: &Props, children: &str) -> Result<String, RenderError> {
        let component = self
            .components
            .get(name)
            .ok_or_else(|| RenderError::UnknownComponent(name.to_string()))?;
        Ok(component.render(props, children)?)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

fn prop<'a>(props: &'a Props, key: &str, default: &'a str) -> &'a str {
    props.get(key).map(String::as_str).unwrap_or(default)
}

#[derive(Template)]
#[template(path = "widgets/menu_item.html")]
struct MenuItemTemplate<'a> {
    href: &'a str,
    label: &'a str,
    active: bool,
    children: &'a str,
}

/// Navigation menu entry. Props: `href`, `label`, `active`.
#[derive(Debug)]
pub struct MenuItem;

impl Component for MenuItem {
    fn render(&self, props: &Props, children: &str) -> askama::Result<String> {
        MenuItemTemplate {
            href: prop(props, "href", "#"),
            label: prop(props, "label", ""),
            active: prop(props, "active", "false") == "true",
            children,
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "widgets/breadcrumb.html")]
struct BreadcrumbTemplate<'a> {
    items: Vec<&'a str>,
}

/// Breadcrumb trail. Props: `items`, newline separated, outermost first.
#[derive(Debug)]
pub struct Breadcrumb;

impl Component for Breadcrumb {
    fn render(&self, props: &Props, _children: &str) -> askama::Result<String> {
        BreadcrumbTemplate {
            items: prop(props, "items", "")
                .lines()
                .filter(|item| !item.is_empty())
                .collect(),
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "widgets/alert.html")]
struct AlertTemplate<'a> {
    kind: &'a str,
    title: &'a str,
    description: &'a str,
    children: &'a str,
}

/// Alert box. Props: `type` (info, warning, error), `title`, `description`.
#[derive(Debug)]
pub struct Alert;

impl Component for Alert {
    fn render(&self, props: &Props, children: &str) -> askama::Result<String> {
        AlertTemplate {
            kind: prop(props, "type", "info"),
            title: prop(props, "title", ""),
            description: prop(props, "description", ""),
            children,
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "widgets/button.html")]
struct ButtonTemplate<'a> {
    kind: &'a str,
    href: &'a str,
    label: &'a str,
}

/// Link styled as a button. Props: `href`, `label`, `type`.
#[derive(Debug)]
pub struct Button;

impl Component for Button {
    fn render(&self, props: &Props, _children: &str) -> askama::Result<String> {
        ButtonTemplate {
            kind: prop(props, "type", "default"),
            href: prop(props, "href", "#"),
            label: prop(props, "label", ""),
        }
        .render()
    }
}

/// The builtin UI widget library, by component name.
pub fn ui_library() -> Vec<(&'static str, Arc<dyn Component>)> {
    vec![
        ("ElMenuItem", Arc::new(MenuItem) as Arc<dyn Component>),
        ("ElBreadcrumb", Arc::new(Breadcrumb)),
        ("ElAlert", Arc::new(Alert)),
        ("ElButton", Arc::new(Button)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Props {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_register_and_render() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(registry.register_all(ui_library()), 4);
        assert!(registry.contains("ElButton"));

        let html = registry
            .render("ElButton", &props(&[("href", "/"), ("label", "Retry")]), "")
            .unwrap();
        assert!(html.contains(r#"<a class="el-button el-button--default" href="/">Retry</a>"#));
        assert!(matches!(
            registry.render("Missing", &Props::new(), ""),
            Err(RenderError::UnknownComponent(ref name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = ComponentRegistry::new();
        assert!(registry.register("X", Arc::new(Alert)).is_none());
        assert!(registry.register("X", Arc::new(Button)).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_menu_item_active_and_escaped() {
        let html = MenuItem
            .render(
                &props(&[("href", "/events"), ("label", "<b>"), ("active", "true")]),
                "<i></i>",
            )
            .unwrap();
        assert!(html.contains("is-active"));
        assert!(html.contains("<i></i><span>&lt;b&gt;</span>"));
    }

    #[test]
    fn test_breadcrumb() {
        let html = Breadcrumb
            .render(&props(&[("items", "Home\nEvents")]), "")
            .unwrap();
        assert_eq!(html.matches("el-breadcrumb__item").count(), 2);
        assert_eq!(html.matches("el-breadcrumb__separator").count(), 1);
    }

    #[test]
    fn test_alert_escapes_text_but_not_children() {
        let html = Alert
            .render(
                &props(&[("type", "error"), ("description", "a < b")]),
                "<a>retry</a>",
            )
            .unwrap();
        assert!(html.contains("el-alert--error"));
        assert!(html.contains("a &lt; b"));
        assert!(html.contains("<a>retry</a>"));
    }
}
