use crate::app::domain::BufferKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub label: &'static str,
    /// Buffer the snippet was written for.
    pub kind: BufferKind,
    pub content: &'static str,
}

pub static SNIPPETS: [Snippet; 5] = [
    Snippet {
        label: "Tailwind Card",
        kind: BufferKind::Markup,
        content: "<div class=\"max-w-sm rounded overflow-hidden shadow-lg bg-white p-6 dark:bg-slate-800 border border-slate-200 dark:border-slate-700\">\n  <h2 class=\"font-bold text-xl mb-2 text-slate-800 dark:text-white\">بطاقة مميزة</h2>\n  <p class=\"text-gray-700 dark:text-gray-300 text-base\">هذا مثال لبطاقة باستخدام Tailwind CSS تدعم الوضع الداكن.</p>\n</div>",
    },
    Snippet {
        label: "Flex Center",
        kind: BufferKind::Style,
        content: ".flex-center {\n  display: flex;\n  justify-content: center;\n  align-items: center;\n}",
    },
    Snippet {
        label: "Fetch API",
        kind: BufferKind::Script,
        content: "async function fetchData() {\n  try {\n    const response = await fetch(\"https://jsonplaceholder.typicode.com/posts/1\");\n    const data = await response.json();\n    console.log(\"Data loaded:\", data);\n    return data;\n  } catch (err) {\n    console.error(\"Fetch error:\", err);\n  }\n}",
    },
    Snippet {
        label: "React Hook",
        kind: BufferKind::Script,
        content: "const [data, setData] = React.useState(null);\nReact.useEffect(() => {\n  console.log(\"Component mounted\");\n}, []);",
    },
    Snippet {
        label: "Neon Glow",
        kind: BufferKind::Style,
        content: ".glow {\n  text-shadow: 0 0 10px rgba(99, 102, 241, 0.8), 0 0 20px rgba(99, 102, 241, 0.4);\n  color: #818cf8;\n}",
    },
];

/// Look a snippet up by label, ignoring case and surrounding whitespace.
pub fn find(label: &str) -> Option<&'static Snippet> {
    let wanted = label.trim();
    SNIPPETS.iter().find(|s| s.label.eq_ignore_ascii_case(wanted))
}
