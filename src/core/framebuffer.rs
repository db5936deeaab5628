use atomic_float::AtomicF32;
use nalgebra::Vector4;
use std::cell::UnsafeCell;
use std::sync::Mutex;
use std::sync::atomic::Ordering;

/// RGBA color and depth storage for one drawing buffer.
///
/// Colors are stored premultiplied so that supersample resolve and "over"
/// compositing stay linear. Thread-safe for parallel rasterization using
/// atomic depth and striped locking for color.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub sample_count: usize,
    pub buffer_width: usize,
    pub buffer_height: usize,

    /// Premultiplied RGBA. Writes are guarded by `locks`.
    color_buffer: UnsafeCell<Vec<Vector4<f32>>>,

    /// Depth in [0, 1], smaller is closer.
    depth_buffer: Vec<AtomicF32>,

    locks: Vec<Mutex<()>>,
}

// Color writes go through the stripe locks and depth through atomics.
unsafe impl Sync for FrameBuffer {}

const LOCK_STRIPES: usize = 1024;

impl FrameBuffer {
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        let sample_count = sample_count.max(1);
        let buffer_width = width * sample_count;
        let buffer_height = height * sample_count;
        let size = buffer_width * buffer_height;

        Self {
            width,
            height,
            sample_count,
            buffer_width,
            buffer_height,
            color_buffer: UnsafeCell::new(vec![Vector4::zeros(); size]),
            depth_buffer: (0..size).map(|_| AtomicF32::new(f32::INFINITY)).collect(),
            locks: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    /// An empty buffer, used once a renderer has released its storage.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            sample_count: 1,
            buffer_width: 0,
            buffer_height: 0,
            color_buffer: UnsafeCell::new(Vec::new()),
            depth_buffer: Vec::new(),
            locks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.depth_buffer.is_empty()
    }

    /// Resets every sample to `color` (straight alpha) and `depth`.
    pub fn clear(&mut self, color: Vector4<f32>, depth: f32) {
        let premultiplied = premultiply(color);
        self.color_buffer.get_mut().fill(premultiplied);
        for d in &self.depth_buffer {
            d.store(depth, Ordering::Relaxed);
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.buffer_width && y < self.buffer_height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.buffer_width + x
    }

    /// Depth test and update.
    /// Returns true if `new_depth` is closer than the stored value, in which
    /// case the stored value is replaced.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let depth = &self.depth_buffer[self.index(x, y)];

        let mut current = depth.load(Ordering::Relaxed);
        loop {
            if new_depth >= current {
                return false;
            }
            match depth.compare_exchange_weak(current, new_depth, Ordering::Acquire, Ordering::Relaxed)
            {
                Ok(_) => return true,
                Err(updated) => current = updated,
            }
        }
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        self.in_bounds(x, y)
            .then(|| self.depth_buffer[self.index(x, y)].load(Ordering::Relaxed))
    }

    /// Composites a straight-alpha color over the stored sample ("over" operator).
    /// Should only be called after `depth_test_and_update` returned true.
    #[inline]
    pub fn blend_pixel_safe(&self, x: usize, y: usize, color: Vector4<f32>) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        let _guard = self.locks[idx % self.locks.len()]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Holding the stripe lock gives exclusive access to this sample.
        unsafe {
            let buffer = &mut *self.color_buffer.get();
            let src = premultiply(color);
            buffer[idx] = src + buffer[idx] * (1.0 - src.w);
        }
    }

    /// Resolves the supersamples of logical pixel (x, y) into one premultiplied RGBA value.
    /// Reads are only meaningful once rendering of the frame has finished.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector4<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let buffer = unsafe { &*self.color_buffer.get() };

        if self.sample_count == 1 {
            return Some(buffer[self.index(x, y)]);
        }

        let mut sum = Vector4::zeros();
        let start_x = x * self.sample_count;
        let start_y = y * self.sample_count;
        for dy in 0..self.sample_count {
            for dx in 0..self.sample_count {
                sum += buffer[self.index(start_x + dx, start_y + dy)];
            }
        }
        Some(sum / (self.sample_count * self.sample_count) as f32)
    }
}

#[inline]
fn premultiply(color: Vector4<f32>) -> Vector4<f32> {
    Vector4::new(color.x * color.w, color.y * color.w, color.z * color.w, color.w)
}
