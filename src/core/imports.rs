// インポートセット
//
// 生成中に必要となったGoパッケージのインポートパスを重複なく蓄積します。
// 出力時はパスの辞書順に並べるため、同じ入力からは常に同じ出力になります。

use std::collections::BTreeSet;

/// インポートパスの集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    paths: BTreeSet<String>,
}

impl ImportSet {
    /// 空のインポートセットを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// インポートパスを登録（既に登録済みなら何もしない）
    pub fn require(&mut self, import_path: impl Into<String>) {
        self.paths.insert(import_path.into());
    }

    /// 登録済みかどうか
    pub fn contains(&self, import_path: &str) -> bool {
        self.paths.contains(import_path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// 辞書順のインポートパス
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}
