//! The static concept table used for one-hop query expansion

/// Concept keys and their synonyms.
///
/// A key expands to its synonyms; a synonym expands to its key and every
/// sibling synonym. Expansion stops there.
pub static CONCEPT_MAP: &[(&str, &[&str])] = &[
    ("button", &["interactive", "form", "click", "input", "ui", "element"]),
    ("deploy", &["ship", "ops", "launch", "release", "production", "ci", "cd"]),
    ("database", &["schema", "data", "table", "model", "prisma", "sql"]),
    ("style", &["css", "design", "theme", "color", "token", "tailwind"]),
    ("auth", &["login", "signup", "session", "permission", "security", "authentication"]),
    ("test", &["qa", "quality", "check", "audit", "verify", "testing"]),
    ("api", &["backend", "server", "endpoint", "route", "action", "rest"]),
    ("layout", &["spacing", "grid", "responsive", "breakpoint", "flex", "gap"]),
    ("text", &["typography", "font", "heading", "copy", "writing"]),
    ("image", &["performance", "optimization", "loading", "asset", "media"]),
    ("error", &["handling", "validation", "message", "boundary", "catch"]),
    ("form", &["input", "validation", "field", "submit", "interactive"]),
    ("component", &["ui", "element", "widget", "block", "module"]),
    ("animation", &["motion", "transition", "hover", "easing", "duration"]),
    ("color", &["theme", "palette", "token", "dark", "light", "mode"]),
    ("accessibility", &["a11y", "wcag", "aria", "screen", "reader", "keyboard", "focus"]),
    ("seo", &["search", "meta", "og", "social", "crawl", "sitemap"]),
    ("setup", &["scaffold", "init", "initialize", "new", "project", "start"]),
    ("code", &["typescript", "react", "standards", "patterns", "naming"]),
    ("copy", &["writing", "ux", "microcopy", "label", "message", "voice"]),
];
