use crate::Vector;

/// Minimum and maximum bounds in three dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// The smallest corner.
    pub min: Vector<f64>,
    /// The largest corner.
    pub max: Vector<f64>,
}

impl Bounds {
    /// Grows the bounds to include the coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{Bounds, Vector};
    /// let mut bounds = Bounds::default();
    /// bounds.grow(Vector::new(1., 2., 3.));
    /// assert_eq!(Vector::new(1., 2., 3.), bounds.max);
    /// ```
    pub fn grow(&mut self, coordinate: Vector<f64>) {
        self.min.x = self.min.x.min(coordinate.x);
        self.min.y = self.min.y.min(coordinate.y);
        self.min.z = self.min.z.min(coordinate.z);
        self.max.x = self.max.x.max(coordinate.x);
        self.max.y = self.max.y.max(coordinate.y);
        self.max.z = self.max.z.max(coordinate.z);
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            min: Vector::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Vector::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow() {
        let mut bounds = Bounds::default();
        bounds.grow(Vector::new(1., 2., 3.));
        bounds.grow(Vector::new(-1., -2., -3.));
        assert_eq!(Vector::new(-1., -2., -3.), bounds.min);
        assert_eq!(Vector::new(1., 2., 3.), bounds.max);
    }
}
