/// 加载进度上报
///
/// 进度只是尽力而为的遥测数据：基于已读字节数 / 文件总字节数，
/// 文件大小估计不准时不保证单调。

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// 扫描结束后、网格组装前上报的进度
pub const ASSEMBLY_PROGRESS: f32 = 0.9;

/// 进度回调的装箱类型
pub type ProgressCallback = Box<dyn FnMut(f32) + Send>;

/// 进度上报器
///
/// 在扫描阶段每 `interval_lines` 行上报一次，
/// 扫描进度乘以 `scan_share`，剩余区间留给网格组装。
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
    interval_lines: usize,
    scan_share: f32,
}

impl ProgressReporter {
    pub fn new(interval_lines: usize, scan_share: f32) -> Self {
        Self {
            callback: None,
            interval_lines: interval_lines.max(1),
            scan_share: scan_share.clamp(0.0, 1.0),
        }
    }

    pub fn set_callback(&mut self, callback: ProgressCallback) {
        self.callback = Some(callback);
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// 直接上报一个进度值（截断到 [0, 1]）
    pub fn report(&mut self, fraction: f32) {
        if let Some(callback) = self.callback.as_mut() {
            callback(fraction.clamp(0.0, 1.0));
        }
    }

    /// 扫描阶段：第 `line_number` 行（从 1 开始）处理完后调用
    ///
    /// 只在行号是上报间隔的整数倍时真正上报。
    pub fn scan_line(&mut self, line_number: usize, bytes_consumed: u64, total_bytes: u64) {
        if line_number % self.interval_lines != 0 || self.callback.is_none() {
            return;
        }
        let fraction = if total_bytes == 0 {
            0.0
        } else {
            bytes_consumed as f32 / total_bytes as f32
        };
        self.report(fraction * self.scan_share);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(10_000, 0.8)
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("has_callback", &self.callback.is_some())
            .field("interval_lines", &self.interval_lines)
            .field("scan_share", &self.scan_share)
            .finish()
    }
}

/// 可在线程间共享的加载进度
///
/// 加载调用本身是同步阻塞的；外层应用通过它轮询"正在加载"标志与进度。
#[derive(Debug, Clone, Default)]
pub struct LoadProgress {
    inner: Arc<LoadProgressInner>,
}

#[derive(Debug, Default)]
struct LoadProgressInner {
    loading: AtomicBool,
    fraction_bits: AtomicU32,
}

impl LoadProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// 标记开始加载，进度归零
    pub fn begin(&self) {
        self.set_fraction(0.0);
        self.inner.loading.store(true, Ordering::Release);
    }

    /// 标记加载结束；失败时进度归零
    pub fn finish(&self, success: bool) {
        self.set_fraction(if success { 1.0 } else { 0.0 });
        self.inner.loading.store(false, Ordering::Release);
    }

    pub fn set_fraction(&self, fraction: f32) {
        self.inner
            .fraction_bits
            .store(fraction.to_bits(), Ordering::Release);
    }

    pub fn fraction(&self) -> f32 {
        f32::from_bits(self.inner.fraction_bits.load(Ordering::Acquire))
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    /// 生成写入本对象的进度回调
    pub fn callback(&self) -> ProgressCallback {
        let progress = self.clone();
        Box::new(move |fraction| progress.set_fraction(fraction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_reporter(interval: usize) -> (ProgressReporter, Arc<Mutex<Vec<f32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut reporter = ProgressReporter::new(interval, 0.8);
        reporter.set_callback(Box::new(move |p| sink.lock().unwrap().push(p)));
        (reporter, seen)
    }

    #[test]
    fn test_scan_reports_on_interval_only() {
        let (mut reporter, seen) = recording_reporter(2);
        reporter.scan_line(1, 10, 100);
        reporter.scan_line(2, 50, 100);
        reporter.scan_line(3, 60, 100);
        reporter.scan_line(4, 100, 100);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!((seen[0] - 0.4).abs() < 1e-6);
        assert!((seen[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_report_clamps() {
        let (mut reporter, seen) = recording_reporter(1);
        reporter.report(1.5);
        reporter.scan_line(1, 10, 0);
        assert_eq!(*seen.lock().unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_without_callback_is_noop() {
        let mut reporter = ProgressReporter::default();
        assert!(!reporter.has_callback());
        reporter.report(0.5);
        reporter.scan_line(10_000, 1, 2);
    }

    #[test]
    fn test_load_progress_handle() {
        let progress = LoadProgress::new();
        progress.begin();
        assert!(progress.is_loading());

        let mut callback = progress.callback();
        callback(0.45);
        assert!((progress.fraction() - 0.45).abs() < 1e-6);

        progress.finish(true);
        assert!(!progress.is_loading());
        assert_eq!(progress.fraction(), 1.0);
    }
}
