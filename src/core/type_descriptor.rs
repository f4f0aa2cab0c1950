// 型記述子
//
// カタログが返す型文字列（例: `uuid`, `text[]`, `SETOF myschema.mood`）を
// コレクション修飾子と基底名に分解します。修飾子は1層だけ取り除きます。

/// 配列サフィックス
pub const ARRAY_SUFFIX: &str = "[]";

/// 集合返却プレフィックス
pub const SETOF_PREFIX: &str = "SETOF ";

/// コレクション修飾子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// 末尾の `[]`
    Array,
    /// 先頭の `SETOF `
    SetOf,
}

/// 分解済みの型記述子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// 検索に使う基底名（スキーマ修飾はそのまま残る）
    pub base: String,
    /// コレクション修飾子
    pub collection: Option<Collection>,
}

impl TypeDescriptor {
    /// 型文字列を分解
    ///
    /// `[]` を先に判定し、該当しない場合のみ `SETOF ` を判定します。
    pub fn parse(descriptor: &str) -> Self {
        if let Some(base) = descriptor.strip_suffix(ARRAY_SUFFIX) {
            return Self {
                base: base.to_string(),
                collection: Some(Collection::Array),
            };
        }
        if let Some(base) = descriptor.strip_prefix(SETOF_PREFIX) {
            return Self {
                base: base.to_string(),
                collection: Some(Collection::SetOf),
            };
        }
        Self {
            base: descriptor.to_string(),
            collection: None,
        }
    }

    /// コレクションかどうか
    pub fn is_collection(&self) -> bool {
        self.collection.is_some()
    }

    /// 集合返却かどうか
    pub fn is_set_returning(&self) -> bool {
        self.collection == Some(Collection::SetOf)
    }

    /// ホスト型をコレクション修飾子で1回だけ包む
    pub fn wrap_host_type(&self, host_type: String) -> String {
        if self.is_collection() {
            format!("[]{}", host_type)
        } else {
            host_type
        }
    }

    /// `schema.name` 形式ならスキーマと型名に分割
    pub fn split_qualified(&self) -> (Option<&str>, &str) {
        match self.base.rsplit_once('.') {
            Some((schema, name)) => (Some(schema), name),
            None => (None, self.base.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let t = TypeDescriptor::parse("uuid");
        assert_eq!(t.base, "uuid");
        assert_eq!(t.collection, None);
        assert_eq!(t.wrap_host_type("uuid.UUID".to_string()), "uuid.UUID");
    }

    #[test]
    fn test_parse_array() {
        let t = TypeDescriptor::parse("text[]");
        assert_eq!(t.base, "text");
        assert_eq!(t.collection, Some(Collection::Array));
        assert!(!t.is_set_returning());
        assert_eq!(t.wrap_host_type("string".to_string()), "[]string");
    }

    #[test]
    fn test_parse_setof() {
        let t = TypeDescriptor::parse("SETOF myschema.mood");
        assert_eq!(t.base, "myschema.mood");
        assert!(t.is_set_returning());
        assert_eq!(t.split_qualified(), (Some("myschema"), "mood"));
    }

    #[test]
    fn test_only_one_layer_is_stripped() {
        // 配列が優先され、SETOF は残る
        let t = TypeDescriptor::parse("SETOF text[]");
        assert_eq!(t.base, "SETOF text");
        assert_eq!(t.collection, Some(Collection::Array));

        let t = TypeDescriptor::parse("integer[][]");
        assert_eq!(t.base, "integer[]");
    }

    #[test]
    fn test_split_unqualified() {
        let t = TypeDescriptor::parse("mood");
        assert_eq!(t.split_qualified(), (None, "mood"));
    }
}
