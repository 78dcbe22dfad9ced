use url::form_urlencoded;

/// The `q`/`cursor` query-string state of the vendor listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub cursor: Option<String>,
}

impl ListingQuery {
    /// Parses `q=..&cursor=..`, with or without a leading `?`. Empty values
    /// count as absent.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "q" => parsed.q = Some(value.into_owned()),
                "cursor" => parsed.cursor = Some(value.into_owned()),
                _ => {}
            }
        }

        parsed
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(q) = &self.q {
            serializer.append_pair("q", q);
        }
        if let Some(cursor) = &self.cursor {
            serializer.append_pair("cursor", cursor);
        }
        serializer.finish()
    }

    /// Location after submitting the search box. Clears everything else.
    pub fn with_search(input: &str) -> Self {
        if input.is_empty() {
            Self::default()
        } else {
            Self {
                q: Some(input.to_string()),
                cursor: None,
            }
        }
    }

    /// Location after moving to another page. Drops the search.
    pub fn with_cursor(cursor: Option<String>) -> Self {
        Self { q: None, cursor }
    }

    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    pub fn is_searching(&self) -> bool {
        !self.search().is_empty()
    }
}

/// Text input bound to the `q` parameter. Only submitting changes the location.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    input: String,
}

impl SearchBox {
    pub fn from_location(location: &ListingQuery) -> Self {
        Self {
            input: location.search().to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn submit(&self) -> ListingQuery {
        ListingQuery::with_search(&self.input)
    }
}

/// Back/forward history of listing locations.
#[derive(Debug, Clone)]
pub struct Navigator {
    entries: Vec<ListingQuery>,
    index: usize,
}

impl Navigator {
    pub fn new(initial: ListingQuery) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &ListingQuery {
        &self.entries[self.index]
    }

    /// Pushes a new location, discarding any forward entries.
    pub fn push(&mut self, location: ListingQuery) {
        if *self.current() == location {
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index += 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&ListingQuery> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&ListingQuery> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}
