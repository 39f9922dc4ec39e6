use crate::error::CryptoError;
use ark_std::rand::Rng;
use rand::seq::SliceRandom;

/// A bijection over `{0..size}`. `mapping[i]` is the input index that
/// lands in output slot `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    pub mapping: Vec<usize>,
}

impl Permutation {
    /// Draw a uniformly random permutation (Fisher-Yates).
    pub fn new<R: Rng>(rng: &mut R, size: usize) -> Self {
        let mut mapping: Vec<usize> = (0..size).collect();
        mapping.shuffle(rng);
        Self { mapping }
    }

    pub fn identity(size: usize) -> Self {
        Self {
            mapping: (0..size).collect(),
        }
    }

    /// Build from an explicit mapping, rejecting anything that is not a
    /// bijection.
    pub fn from_mapping(mapping: Vec<usize>) -> Result<Self, CryptoError> {
        let mut seen = vec![false; mapping.len()];
        for &i in &mapping {
            if i >= mapping.len() || seen[i] {
                return Err(CryptoError::InvalidPermutation(mapping.len()));
            }
            seen[i] = true;
        }
        Ok(Self { mapping })
    }

    pub fn size(&self) -> usize {
        self.mapping.len()
    }

    /// Reorder a slice: output slot `i` receives `xs[mapping[i]]`.
    pub fn permute_array<T: Clone>(&self, xs: &[T]) -> Vec<T> {
        self.mapping.iter().map(|&i| xs[i].clone()).collect()
    }
}

#[cfg(test)]
mod test {
    use super::Permutation;
    use ark_std::rand::thread_rng;

    #[test]
    fn random_permutation_is_a_bijection() {
        let mut rng = thread_rng();
        let permutation = Permutation::new(&mut rng, 52);

        let mut seen = vec![false; 52];
        for &i in &permutation.mapping {
            assert!(!seen[i]);
            seen[i] = true;
        }
    }

    #[test]
    fn permute_array_follows_mapping() {
        let permutation = Permutation::from_mapping(vec![2, 0, 1]).unwrap();
        assert_eq!(permutation.permute_array(&['a', 'b', 'c']), vec!['c', 'a', 'b']);
    }

    #[test]
    fn rejects_non_bijections() {
        assert!(Permutation::from_mapping(vec![0, 0, 1]).is_err());
        assert!(Permutation::from_mapping(vec![1, 2, 3]).is_err());
    }
}
