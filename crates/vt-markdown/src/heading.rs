//! Heading demotion, anchor generation and table of contents.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use crate::util::{heading_level_to_num, num_to_heading_level};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocEntry {
    /// Heading level after demotion (2-6 with the default offset).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID.
    pub id: String,
}

/// Rewrites heading events in place.
///
/// Each heading is shifted down by `offset` levels (clamped at `h6`) and
/// receives an `id`. Explicit ids from `{#custom-id}` attributes are kept
/// verbatim, so two headings given the same explicit id share it. Generated
/// ids never collide with each other or with any explicit id in the
/// document, wherever it appears.
pub(crate) struct HeadingRewriter {
    offset: u8,
    used_ids: HashMap<String, usize>,
    toc: Vec<TocEntry>,
}

impl HeadingRewriter {
    pub(crate) fn new(offset: u8) -> Self {
        Self {
            offset,
            used_ids: HashMap::new(),
            toc: Vec::new(),
        }
    }

    /// Rewrite all headings in `events` and return the collected entries.
    pub(crate) fn rewrite(mut self, events: &mut [Event<'_>]) -> Vec<TocEntry> {
        self.reserve_explicit_ids(events);

        // (index of the Start event, accumulated plain text)
        let mut open: Option<(usize, String)> = None;

        for i in 0..events.len() {
            match &mut events[i] {
                Event::Start(Tag::Heading { .. }) => {
                    open = Some((i, String::new()));
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, buffer)) = open.as_mut() {
                        buffer.push_str(text);
                    }
                }
                Event::End(TagEnd::Heading(level)) => {
                    let Some((start, title)) = open.take() else {
                        continue;
                    };
                    let demoted = num_to_heading_level(
                        heading_level_to_num(*level).saturating_add(self.offset),
                    );
                    *level = demoted;

                    if let Event::Start(Tag::Heading {
                        level: start_level,
                        id,
                        ..
                    }) = &mut events[start]
                    {
                        *start_level = demoted;
                        let anchor = match id.as_deref() {
                            Some(explicit) => explicit.to_owned(),
                            None => self.unique_id(&title),
                        };
                        *id = Some(CowStr::from(anchor.clone()));
                        self.toc.push(TocEntry {
                            level: heading_level_to_num(demoted),
                            title: title.trim().to_owned(),
                            id: anchor,
                        });
                    }
                }
                _ => {}
            }
        }

        self.toc
    }

    /// Record every explicit id up front so generated ids avoid them.
    fn reserve_explicit_ids(&mut self, events: &[Event<'_>]) {
        for event in events {
            if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
                self.used_ids.entry(id.to_string()).or_insert(1);
            }
        }
    }

    fn unique_id(&mut self, title: &str) -> String {
        let base = slugify(title);
        let mut candidate = base.clone();
        while let Some(count) = self.used_ids.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{base}-{}", *count - 1);
        }
        self.used_ids.insert(candidate.clone(), 1);
        candidate
    }
}

/// Turn heading text into an anchor id.
///
/// Lowercases, keeps alphanumerics, and joins words with single hyphens.
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}
