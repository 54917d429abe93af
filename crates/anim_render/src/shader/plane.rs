/// Dense row-major 2D array used for shader meshes and fields.
///
/// Shaders are written as whole-plane transforms (`map`, `zip_map`) rather
/// than per-pixel loops.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy> Plane<T> {
    pub fn new(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(width * height, data.len());
        Self { width, height, data }
    }

    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self { width, height, data: vec![value; width * height] }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.width.max(1))
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Plane<U> {
        let data = self.data.iter().copied().map(f).collect();
        Plane { width: self.width, height: self.height, data }
    }

    /// Element-wise combination of two planes of equal size.
    pub fn zip_map<U: Copy, V>(&self, other: &Plane<U>, f: impl Fn(T, U) -> V) -> Plane<V> {
        assert_eq!(self.dims(), other.dims());
        let data = self.data.iter().zip(&other.data).map(|(&a, &b)| f(a, b)).collect();
        Plane { width: self.width, height: self.height, data }
    }
}

impl Plane<f32> {
    pub fn add(&self, other: &Plane<f32>) -> Plane<f32> {
        self.zip_map(other, |a, b| a + b)
    }

    pub fn scale(&self, factor: f32) -> Plane<f32> {
        self.map(|v| v * factor)
    }

    pub fn clip(&self, min: f32, max: f32) -> Plane<f32> {
        self.map(|v| v.clamp(min, max))
    }
}
