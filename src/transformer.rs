use crate::document::{self, DEFAULT_AUTHOR};
use crate::error::XmlSyntaxError;
use crate::table::{COLUMN_TAG, CONSTRAINT_TAG, TableDocument};

/// Rewrites one table file into its canonical, sorted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTransformer {
    tag_name: String,
    author: String,
}

impl TableTransformer {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Parse `source`, sort its groups and return the normalized document text
    pub fn transform(&self, file_name: &str, source: &str) -> Result<String, XmlSyntaxError> {
        let table = TableDocument::parse(source)?;
        let dropped = table
            .children()
            .iter()
            .filter(|child| child.tag() != COLUMN_TAG && child.tag() != CONSTRAINT_TAG)
            .count();
        if dropped > 0 {
            tracing::warn!(
                file = file_name,
                dropped,
                "children other than column and constraint are not carried over"
            );
        }

        let generated = self.regenerate(file_name, &table);
        document::normalize(&generated)
    }

    /// Build the document text before normalization
    pub fn regenerate(&self, file_name: &str, table: &TableDocument) -> String {
        let mut columns = table.group(COLUMN_TAG);
        let mut constraints = table.group(CONSTRAINT_TAG);
        columns.sort_by_field(&self.tag_name);
        constraints.sort_by_field(&self.tag_name);

        tracing::debug!(
            file = file_name,
            columns = columns.len(),
            constraints = constraints.len(),
            "regenerating table"
        );

        let mut text = document::render_header(file_name, &self.author);
        text.push_str(&document::render_group(&columns));
        text.push_str(&document::render_group(&constraints));
        text.push_str(document::render_footer());
        text
    }
}
