use mongodb::bson::{Bson, Document, doc};

/// 链式构造 MongoDB 过滤条件
///
/// 同一段内的条件合并为一个文档，`and()` / `or()` 结束当前段并决定段之间的逻辑关系。
#[derive(Debug, Default, Clone)]
pub struct QueryBuilder {
    clauses: Vec<Document>,
    current: Document,
    logic_op: Option<&'static str>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, value.into());
        self
    }

    pub fn ne(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, doc! { "$ne": value.into() });
        self
    }

    pub fn in_array<T: Into<Bson>>(mut self, field: &str, values: Vec<T>) -> Self {
        let arr = values.into_iter().map(Into::into).collect::<Vec<_>>();
        self.current.insert(field, doc! { "$in": arr });
        self
    }

    pub fn not_in<T: Into<Bson>>(mut self, field: &str, values: Vec<T>) -> Self {
        let arr = values.into_iter().map(Into::into).collect::<Vec<_>>();
        self.current.insert(field, doc! { "$nin": arr });
        self
    }

    pub fn and(self) -> Self {
        self.close_segment("$and")
    }

    pub fn or(self) -> Self {
        self.close_segment("$or")
    }

    fn close_segment(mut self, op: &'static str) -> Self {
        self.logic_op = Some(op);
        self.clauses.push(std::mem::take(&mut self.current));
        self
    }

    pub fn build(mut self) -> Document {
        if !self.current.is_empty() {
            self.clauses.push(self.current);
        }
        match self.logic_op {
            Some(op) => doc! { op: self.clauses },
            None if self.clauses.len() == 1 => self.clauses.remove(0),
            None => doc! {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_is_a_plain_document() {
        let filter = QueryBuilder::new().eq("sender", "a").eq("status", "pending").build();
        assert_eq!(filter, doc! { "sender": "a", "status": "pending" });
    }

    #[test]
    fn or_joins_segments() {
        let filter = QueryBuilder::new()
            .eq("sender", "a")
            .eq("recipient", "b")
            .or()
            .eq("sender", "b")
            .eq("recipient", "a")
            .build();
        assert_eq!(
            filter,
            doc! { "$or": [
                { "sender": "a", "recipient": "b" },
                { "sender": "b", "recipient": "a" },
            ] }
        );
    }

    #[test]
    fn and_with_set_operators() {
        let filter = QueryBuilder::new()
            .ne("_id", "me")
            .and()
            .not_in("_id", vec!["f1", "f2"])
            .and()
            .in_array("gainedSkills", vec!["go"])
            .build();
        assert_eq!(
            filter,
            doc! { "$and": [
                { "_id": { "$ne": "me" } },
                { "_id": { "$nin": ["f1", "f2"] } },
                { "gainedSkills": { "$in": ["go"] } },
            ] }
        );
    }

    #[test]
    fn empty_builder_matches_everything() {
        assert_eq!(QueryBuilder::new().build(), doc! {});
    }
}
