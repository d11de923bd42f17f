// 音素词典
//
// 单词 → IPA 音标的只读映射，启动时构建一次，之后不再变更
// IPA 音标仅作为不透明的等值比较 token 使用，不做音素分解

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// 内置词表（已去重）
///
/// 同一单词多次出现时按"最后一次赋值生效"合并，
/// 与原始数据的扁平映射语义一致（如 tear 取 /tɪə/）
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    // 单元音
    ("pan", "/pæn/"),
    ("cap", "/kæp/"),
    ("pen", "/pɛn/"),
    ("bed", "/bɛd/"),
    ("cup", "/kʌp/"),
    ("bud", "/bʌd/"),
    ("pot", "/pɒt/"),
    ("cot", "/kɒt/"),
    ("pin", "/pɪn/"),
    ("sheep", "/ʃiːp/"),
    ("ship", "/ʃɪp/"),
    ("keep", "/kiːp/"),
    ("port", "/pɔːt/"),
    ("pull", "/pʊl/"),
    ("pool", "/puːl/"),
    ("pain", "/peɪn/"),
    ("pawn", "/pɔːn/"),
    ("part", "/pɑːt/"),
    ("purn", "/pɜːn/"),
    ("pun", "/pʌn/"),
    ("poon", "/puːn/"),
    ("pon", "/pɒn/"),
    ("pint", "/paɪnt/"),
    ("kite", "/kaɪt/"),
    ("cute", "/kjuːt/"),
    ("caught", "/kɔːt/"),
    ("cat", "/kæt/"),
    ("kit", "/kɪt/"),
    ("cop", "/kɒp/"),
    ("cope", "/kəʊp/"),
    ("cape", "/keɪp/"),
    ("kept", "/kɛpt/"),
    ("carp", "/kɑːp/"),
    ("curb", "/kɜːb/"),
    ("kip", "/kɪp/"),
    ("coop", "/kuːp/"),
    // 双元音与 f/g/t 系列
    ("flea", "/fliː/"),
    ("flee", "/fliː/"),
    ("fly", "/flaɪ/"),
    ("flow", "/fləʊ/"),
    ("flaw", "/flɔː/"),
    ("flew", "/fluː/"),
    ("flue", "/fluː/"),
    ("floor", "/flɔː/"),
    ("flower", "/flaʊə/"),
    ("flair", "/fleə/"),
    ("flour", "/flaʊə/"),
    ("fright", "/fraɪt/"),
    ("fruit", "/fruːt/"),
    ("free", "/friː/"),
    ("fee", "/fiː/"),
    ("few", "/fjuː/"),
    ("go", "/gəʊ/"),
    ("guy", "/gaɪ/"),
    ("gay", "/geɪ/"),
    ("gow", "/gaʊ/"),
    ("goo", "/guː/"),
    ("gore", "/gɔː/"),
    ("gear", "/gɪə/"),
    ("gare", "/geə/"),
    ("tour", "/tʊə/"),
    ("tire", "/taɪə/"),
    ("tear", "/tɪə/"),
    ("tower", "/taʊə/"),
    ("tore", "/tɔː/"),
    ("too", "/tuː/"),
    ("tug", "/tʌg/"),
    // 中央元音与 p 系列
    ("beer", "/bɪə/"),
    ("bear", "/beə/"),
    ("poor", "/pʊə/"),
    ("peer", "/pɪə/"),
    ("pair", "/peə/"),
    ("power", "/paʊə/"),
    ("par", "/pɑː/"),
    ("paw", "/pɔː/"),
    ("pear", "/peə/"),
    ("pier", "/pɪə/"),
    ("put", "/pʊt/"),
    ("poo", "/puː/"),
    ("purr", "/pɜː/"),
    // 练习用最小对立对
    ("sit", "/sɪt/"),
    ("seat", "/siːt/"),
    ("desk", "/dɛsk/"),
    ("disk", "/dɪsk/"),
    ("wet", "/wɛt/"),
    ("wait", "/weɪt/"),
];

lazy_static::lazy_static! {
    /// 进程级共享的内置词典
    static ref BUILTIN: PhonemeLexicon = PhonemeLexicon::from_entries(
        BUILTIN_ENTRIES.iter().map(|&(w, p)| (w.to_string(), p.to_string())),
    );
}

/// 单词 → IPA 音标词典
///
/// 键在构建时统一小写，查询时对输入小写后精确匹配，
/// 不做词干化或模糊匹配；查不到属于正常情况
#[derive(Debug, Clone, Default)]
pub struct PhonemeLexicon {
    map: HashMap<String, String>,
}

impl PhonemeLexicon {
    /// 获取内置词典
    pub fn builtin() -> &'static PhonemeLexicon {
        &BUILTIN
    }

    /// 从 (单词, 音标) 序列构建，重复键保留最后一次赋值
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let map = entries
            .into_iter()
            .map(|(word, phoneme)| (word.to_lowercase(), phoneme))
            .collect();
        Self { map }
    }

    /// 从 JSON 对象文件加载（`{"word": "/ipa/"}`）
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon = Self::from_json_str(&content)?;
        tracing::info!("已从 {:?} 加载词典，共 {} 个词条", path, lexicon.len());
        Ok(lexicon)
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(content)?;
        Ok(Self::from_entries(raw))
    }

    /// 查询单词的音标，输入先转小写
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.map.get(&word.to_lowercase()).map(|s| s.as_str())
    }

    /// 单词是否在词典中
    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let lexicon = PhonemeLexicon::builtin();
        assert_eq!(lexicon.lookup("pan"), Some("/pæn/"));
        assert_eq!(lexicon.lookup("pen"), Some("/pɛn/"));
        assert_eq!(lexicon.lookup("sheep"), Some("/ʃiːp/"));
        assert_eq!(lexicon.lookup("zzzq"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lexicon = PhonemeLexicon::builtin();
        assert_eq!(lexicon.lookup("PAN"), Some("/pæn/"));
        assert_eq!(lexicon.lookup("Sheep"), Some("/ʃiːp/"));
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        // tear 在原始数据中被赋值两次，保留后一次的 /tɪə/
        let lexicon = PhonemeLexicon::builtin();
        assert_eq!(lexicon.lookup("tear"), Some("/tɪə/"));

        let rebuilt = PhonemeLexicon::from_entries(vec![
            ("tear".to_string(), "/teə/".to_string()),
            ("tear".to_string(), "/tɪə/".to_string()),
        ]);
        assert_eq!(rebuilt.lookup("tear"), Some("/tɪə/"));
        assert_eq!(rebuilt.len(), 1);
    }

    #[test]
    fn test_from_json_str() {
        let lexicon = PhonemeLexicon::from_json_str(r#"{"Pan": "/pæn/", "pen": "/pɛn/"}"#).unwrap();
        assert_eq!(lexicon.len(), 2);
        // 键在加载时小写化
        assert_eq!(lexicon.lookup("pan"), Some("/pæn/"));
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        assert!(PhonemeLexicon::from_json_str("not json").is_err());
        assert!(PhonemeLexicon::from_json_str(r#"["pan"]"#).is_err());
    }
}
