//! Synthetic student name generation from curated character lists.
//!
//! All generation is deterministic (same RNG seed = same names).

use crate::rng::AtlasRng;
use std::collections::HashSet;

/// Random-synthesis attempts per requested name before the serial
/// fallback takes over.
const ATTEMPTS_PER_NAME: usize = 60;

pub struct NameGenerator;

impl NameGenerator {
    /// Generate exactly `count` distinct names.
    ///
    /// Candidates are synthesized and retried on collision; any slots
    /// still unfilled after `count * 60` attempts are taken by serial
    /// fallback names ("学生01", "学生02", ...), keeping the
    /// distinctness post-condition unconditional.
    pub fn generate_unique(count: usize, rng: &mut AtlasRng) -> Vec<String> {
        let mut names = Vec::with_capacity(count);
        let mut used = HashSet::new();
        let max_attempts = count * ATTEMPTS_PER_NAME;
        let mut attempts = 0;

        while names.len() < count && attempts < max_attempts {
            let name = Self::generate_one(rng);
            if used.insert(name.clone()) {
                names.push(name);
            }
            attempts += 1;
        }

        let mut serial = names.len() + 1;
        while names.len() < count {
            let fallback = format!("学生{serial:02}");
            serial += 1;
            if used.insert(fallback.clone()) {
                names.push(fallback);
            }
        }

        names
    }

    /// One candidate: a surname plus a given name of one character
    /// (25% of the time) or two.
    fn generate_one(rng: &mut AtlasRng) -> String {
        let surnames = Self::surnames();
        let chars = Self::given_chars();

        let mut name = String::from(surnames[rng.next_u64_below(surnames.len() as u64) as usize]);
        let given_len = if rng.chance(0.25) { 1 } else { 2 };
        for _ in 0..given_len {
            name.push_str(chars[rng.next_u64_below(chars.len() as u64) as usize]);
        }
        name
    }

    /// Curated surname list.
    fn surnames() -> &'static [&'static str] {
        &[
            "王", "李", "张", "刘", "陈", "杨", "赵", "黄", "周", "吴", "徐", "孙", "胡", "朱",
            "高", "林", "何", "郭", "马", "罗", "梁", "宋", "郑", "谢", "韩", "唐", "冯", "于",
            "董", "萧", "程", "曹", "袁", "邓", "许", "傅", "沈", "曾", "彭", "吕", "苏", "卢",
            "蒋", "蔡", "贾", "丁", "魏", "薛",
        ]
    }

    /// Curated given-name character list.
    fn given_chars() -> &'static [&'static str] {
        &[
            "子", "宇", "浩", "晨", "泽", "嘉", "俊", "博", "奕", "铭", "思", "雅", "欣", "雨",
            "诗", "依", "雪", "语", "文", "轩", "航", "宁", "清", "彦", "昊", "瑶", "可", "涵",
            "安", "辰", "悦", "彤", "远", "睿", "哲", "楠", "楷", "逸", "祺", "琪", "雯", "然",
            "霖", "妍", "珂", "宸", "凡", "阳",
        ]
    }
}
