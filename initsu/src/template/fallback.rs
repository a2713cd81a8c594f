//! Built-in content used when a template file cannot be fetched

/// Category of a template file, decided by its path suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// CSS-like stylesheet
    Stylesheet,
    /// Next.js page component
    Page,
    /// Anything else; falls back to empty content
    Unknown,
}

/// Suffix table, checked in order; first match wins
const SUFFIX_KINDS: &[(&str, FileKind)] = &[
    (".css", FileKind::Stylesheet),
    (".scss", FileKind::Stylesheet),
    ("page.tsx", FileKind::Page),
    ("page.jsx", FileKind::Page),
    ("page.js", FileKind::Page),
];

/// Tailwind stylesheet boilerplate
pub const STYLESHEET_FALLBACK: &str = r"@tailwind base;
@tailwind components;
@tailwind utilities;

:root {
  --foreground-rgb: 0, 0, 0;
  --background-start-rgb: 214, 219, 220;
  --background-end-rgb: 255, 255, 255;
}

@media (prefers-color-scheme: dark) {
  :root {
    --foreground-rgb: 255, 255, 255;
    --background-start-rgb: 0, 0, 0;
    --background-end-rgb: 0, 0, 0;
  }
}

body {
  color: rgb(var(--foreground-rgb));
  background: linear-gradient(
      to bottom,
      transparent,
      rgb(var(--background-end-rgb))
    )
    rgb(var(--background-start-rgb));
}
";

/// Minimal home page component
pub const PAGE_FALLBACK: &str = r#"export default function Home() {
  return (
    <div className="grid grid-rows-[20px_1fr_20px] items-center justify-items-center min-h-screen p-8 pb-20 gap-16 sm:p-20">
      <main className="flex flex-col gap-8 row-start-2 items-center sm:items-start">
        <h1 className="text-4xl font-bold">Welcome to Next.js!</h1>
        <p className="text-lg">Get started by editing this page.</p>
      </main>
    </div>
  );
}
"#;

impl FileKind {
    /// Classify a template path
    #[must_use]
    pub fn of(path: &str) -> Self {
        SUFFIX_KINDS
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix))
            .map_or(Self::Unknown, |&(_, kind)| kind)
    }

    /// Built-in content for this kind
    #[must_use]
    pub const fn fallback(self) -> &'static str {
        match self {
            Self::Stylesheet => STYLESHEET_FALLBACK,
            Self::Page => PAGE_FALLBACK,
            Self::Unknown => "",
        }
    }
}

/// Content to use for `path` when its remote copy is unavailable
#[must_use]
pub fn fallback_content(path: &str) -> &'static str {
    FileKind::of(path).fallback()
}
