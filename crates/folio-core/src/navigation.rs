#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Projects,
    About,
    Contact,
}

/// Header navigation, in display order.
pub const NAVIGATION: [Route; 4] = [Route::Home, Route::Projects, Route::About, Route::Contact];

pub const FILTER_PARAM: &str = "filter";

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Projects => "/projects",
            Self::About => "/about",
            Self::Contact => "/contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Projects => "Projects",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        NAVIGATION.into_iter().find(|route| route.path() == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub filter: Option<String>,
}

impl Location {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            filter: None,
        }
    }

    pub fn projects(filter: Option<String>) -> Self {
        Self {
            route: Route::Projects,
            filter: filter.filter(|value| !value.is_empty()),
        }
    }

    /// Resolves `path?query`. Unknown paths resolve to `None`.
    pub fn parse(target: &str) -> Option<Self> {
        let target = target.split('#').next().unwrap_or_default();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let route = Route::from_path(path)?;
        let filter = query
            .and_then(|query| query_value(query, FILTER_PARAM))
            .filter(|value| !value.is_empty());
        Some(Self { route, filter })
    }

    pub fn href(&self) -> String {
        match &self.filter {
            Some(filter) => format!(
                "{}?{}={}",
                self.route.path(),
                FILTER_PARAM,
                encode_component(filter)
            ),
            None => self.route.path().to_string(),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusArea {
    pub label: &'static str,
    pub icon: &'static str,
}

impl FocusArea {
    pub fn location(self) -> Location {
        Location::projects(Some(self.label.to_string()))
    }
}

/// Home-page focus areas; each links to the listing filtered by its label.
pub const FOCUS_AREAS: [FocusArea; 4] = [
    FocusArea {
        label: "Data",
        icon: "📊",
    },
    FocusArea {
        label: "Technology",
        icon: "💻",
    },
    FocusArea {
        label: "Psychology",
        icon: "🧠",
    },
    FocusArea {
        label: "Education",
        icon: "📚",
    },
];

fn query_value(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(name, _)| decode_component(name) == key)
        .map(|(_, value)| decode_component(value))
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let decoded = match (bytes.get(i + 1), bytes.get(i + 2)) {
                    (Some(&high), Some(&low)) => hex_pair(high, low),
                    _ => None,
                };
                match decoded {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let high = (high as char).to_digit(16)?;
    let low = (low as char).to_digit(16)?;
    u8::try_from(high * 16 + low).ok()
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
