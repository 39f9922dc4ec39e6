#[cfg(test)]
mod test {
    use crate::curve::{Fq, Fr, ProjectivePoint};
    use crate::error::CryptoError;
    use ark_ff::{Field, UniformRand, Zero};
    use ark_std::rand::thread_rng;

    #[test]
    fn generator_is_on_curve() {
        assert!(ProjectivePoint::GENERATOR.is_on_curve());
        assert!(ProjectivePoint::IDENTITY.is_on_curve());
    }

    #[test]
    fn identity_is_neutral() {
        let mut rng = thread_rng();
        let p = ProjectivePoint::rand(&mut rng);

        assert_eq!(p.add(&ProjectivePoint::IDENTITY), p);
        assert_eq!(ProjectivePoint::IDENTITY.add(&p), p);
    }

    #[test]
    fn addition_is_commutative_and_associative() {
        let mut rng = thread_rng();
        let p = ProjectivePoint::rand(&mut rng);
        let q = ProjectivePoint::rand(&mut rng);
        let r = ProjectivePoint::rand(&mut rng);

        assert_eq!(p.add(&q), q.add(&p));
        assert_eq!(p.add(&q).add(&r), p.add(&q.add(&r)));
    }

    #[test]
    fn negation_cancels() {
        let mut rng = thread_rng();
        let p = ProjectivePoint::rand(&mut rng);

        assert_eq!(p.add(&p.neg()), ProjectivePoint::IDENTITY);
    }

    #[test]
    fn scalar_mul_matches_repeated_addition() {
        let mut rng = thread_rng();
        let p = ProjectivePoint::rand(&mut rng);

        let mut expected = ProjectivePoint::IDENTITY;
        for k in 0u64..6 {
            assert_eq!(p.mul_scalar(&Fr::from(k)), expected);
            expected = expected.add(&p);
        }
    }

    #[test]
    fn scalar_mul_distributes() {
        let mut rng = thread_rng();
        let p = ProjectivePoint::rand(&mut rng);
        let a = Fr::rand(&mut rng);
        let b = Fr::rand(&mut rng);

        assert_eq!(
            p.mul_scalar(&(a + b)),
            p.mul_scalar(&a).add(&p.mul_scalar(&b))
        );
    }

    #[test]
    fn zero_scalar_yields_identity() {
        let mut rng = thread_rng();
        let p = ProjectivePoint::rand(&mut rng);

        assert_eq!(p.mul_scalar(&Fr::zero()), ProjectivePoint::IDENTITY);
    }

    #[test]
    fn projective_classes_compare_equal() {
        let mut rng = thread_rng();
        let p = ProjectivePoint::rand(&mut rng);
        let factor = Fq::rand(&mut rng);

        let scaled = ProjectivePoint::new(p.x * factor, p.y * factor, p.z * factor);
        assert_eq!(p, scaled);
        assert_eq!(p.to_affine().unwrap(), scaled.to_affine().unwrap());
    }

    #[test]
    fn zero_z_fails_affine_conversion() {
        let bogus = ProjectivePoint::new(Fq::ZERO, Fq::ONE, Fq::ZERO);

        assert!(!bogus.is_on_curve());
        assert_eq!(bogus.to_affine(), Err(CryptoError::ZeroInversion));
    }

    #[test]
    fn off_curve_point_is_rejected()  {
        let bogus = ProjectivePoint::new(Fq::from(3u64), Fq::from(7u64), Fq::ONE);
        assert!(!bogus.is_on_curve());
    }
}
