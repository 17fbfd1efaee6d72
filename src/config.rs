//! 运行配置。

/// 实体与执行层共享的配置。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// 以 info 级别输出每条执行的 SQL 与耗时。
    pub log: bool,
    /// created_at / updated_at 使用带时区的时间戳类型。
    pub timezone: bool,
    /// 迁移模式：执行错误升级为 `Error::Fatal`。
    pub migration: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    pub fn with_timezone(mut self, timezone: bool) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_migration(mut self, migration: bool) -> Self {
        self.migration = migration;
        self
    }
}
