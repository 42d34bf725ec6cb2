use matrix_util::traits::IntegralOps;
use mixer::validation::{check_max_workers, RAW_COUNT_TOLERANCE};
use mixer::*;

fn counts() -> AnnotatedMatrix {
    let x = nalgebra::DMatrix::<f32>::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 0.0]);
    AnnotatedMatrix::with_var_names(x, vec!["A".into(), "B".into()]).unwrap()
}

fn normalized() -> AnnotatedMatrix {
    let x = nalgebra::DMatrix::<f32>::from_row_slice(1, 2, &[1.5, 2.0]);
    AnnotatedMatrix::with_var_names(x, vec!["A".into(), "B".into()]).unwrap()
}

fn ps_sc() -> GeneClustParams {
    GeneClustParams::ps(Modality::Sc, 7)
}

#[test]
fn default_fast_run_passes() {
    let report = check_args(&counts(), None, &GeneClustParams::fast(200)).unwrap();
    assert!(report.do_norm);
    assert!(report.warnings.is_empty());
}

#[test]
fn max_workers_out_of_range() {
    let n_cpus = num_cpus::get() as i64;

    for max_workers in [-3, 0, n_cpus + 1, n_cpus + 100] {
        let params = GeneClustParams {
            max_workers,
            ..GeneClustParams::fast(10)
        };
        let err = check_args(&counts(), None, &params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    for max_workers in [1, n_cpus] {
        let params = GeneClustParams {
            max_workers,
            ..GeneClustParams::fast(10)
        };
        assert!(check_args(&counts(), None, &params).is_ok());
    }
}

#[test]
fn worker_limit_names_the_maximum() {
    assert_eq!(
        check_max_workers(9, 8).unwrap_err(),
        MixerError::WorkerLimitExceeded { max: 8, got: 9 }
    );
    assert_eq!(
        check_max_workers(9, 8).unwrap_err().to_string(),
        "Worker limit exceeded. Maximum 8, got 9."
    );
    assert!(check_max_workers(8, 8).is_ok());
    assert!(check_max_workers(0, 8).is_err());
}

#[test]
fn fast_requires_n_gene_clusters() {
    let params = GeneClustParams::default();
    assert_eq!(params.version, Version::Fast);

    let err = check_gene_clustering(None, &params).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(
        err.to_string(),
        "Expected `n_gene_clusters` to be an integer, got None."
    );

    for n in [1, 0, -4] {
        let err = check_gene_clustering(None, &GeneClustParams::fast(n)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    assert!(check_gene_clustering(None, &GeneClustParams::fast(2)).is_ok());
}

#[test]
fn fast_rejects_spatial() {
    let img = SpatialImage::new(ndarray::Array3::zeros((4, 4, 3)));

    for image in [None, Some(&img)] {
        let params = GeneClustParams {
            modality: Modality::St,
            ..GeneClustParams::fast(50)
        };
        let err = check_gene_clustering(image, &params).unwrap_err();
        assert_eq!(err, MixerError::FastSpatialUnsupported);
        assert_eq!(err.kind(), ErrorKind::Value);
    }
}

#[test]
fn ps_rejects_n_gene_clusters() {
    for modality in [Modality::Sc, Modality::St] {
        for n in [2, 200] {
            let params = GeneClustParams {
                n_gene_clusters: Some(n),
                ..GeneClustParams::ps(modality, 5)
            };
            let err = check_gene_clustering(None, &params).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type);
        }
    }
}

#[test]
fn relevant_gene_pct_range() {
    for pct in [0, 101, -5] {
        let params = GeneClustParams {
            relevant_gene_pct: Some(pct),
            ..ps_sc()
        };
        let err = check_gene_clustering(None, &params).unwrap_err();
        assert_eq!(
            err,
            MixerError::InvalidValue {
                name: "relevant_gene_pct",
                expected: "between (0, 100]",
                got: pct.to_string().into_boxed_str(),
            }
        );
    }

    for pct in [1, 50, 100] {
        let params = GeneClustParams {
            relevant_gene_pct: Some(pct),
            ..ps_sc()
        };
        assert!(check_gene_clustering(None, &params).unwrap().is_empty());
    }
}

#[test]
fn ps_numeric_parameters() {
    let unset_obs = GeneClustParams {
        n_obs_clusters: None,
        ..ps_sc()
    };
    assert_eq!(
        check_gene_clustering(None, &unset_obs).unwrap_err().kind(),
        ErrorKind::Type
    );

    let one_obs = GeneClustParams {
        n_obs_clusters: Some(1),
        ..ps_sc()
    };
    assert_eq!(
        check_gene_clustering(None, &one_obs).unwrap_err().to_string(),
        "Expected `n_obs_clusters` > 1, got 1."
    );

    let one_pc = GeneClustParams {
        n_components: Some(1),
        ..ps_sc()
    };
    assert_eq!(
        check_gene_clustering(None, &one_pc).unwrap_err().kind(),
        ErrorKind::Value
    );

    for alpha in [0.0, -0.5, f64::NAN] {
        let params = GeneClustParams { alpha, ..ps_sc() };
        assert_eq!(
            check_gene_clustering(None, &params).unwrap_err().kind(),
            ErrorKind::Value
        );
    }
}

#[test]
fn ps_checks_alpha_before_n_obs_clusters() {
    let params = GeneClustParams {
        alpha: -1.0,
        n_obs_clusters: Some(0),
        ..ps_sc()
    };
    let err = check_gene_clustering(None, &params).unwrap_err();
    assert!(matches!(err, MixerError::InvalidValue { name: "alpha", .. }));
}

#[test]
fn spatial_image_is_optional() {
    let params = GeneClustParams::ps(Modality::St, 15);

    let warnings = check_gene_clustering(None, &params).unwrap();
    assert_eq!(warnings, vec![ValidationWarning::MissingSpatialImage]);

    let img = SpatialImage::from_gray(ndarray::Array2::from_elem((3, 3), 255.0));
    assert!(check_gene_clustering(Some(&img), &params)
        .unwrap()
        .is_empty());

    // single-cell data never needs an image
    assert!(check_gene_clustering(None, &ps_sc()).unwrap().is_empty());
}

#[test]
fn raw_counts_dense() {
    assert!(check_raw_counts(&counts()));
    assert!(!check_raw_counts(&normalized()));

    let report = check_args(&normalized(), None, &GeneClustParams::fast(10)).unwrap();
    assert!(!report.do_norm);
    assert_eq!(report.warnings, vec![ValidationWarning::NormalizedCounts]);
}

#[test]
fn raw_counts_round_to_nearest_integer() {
    let x = nalgebra::DMatrix::<f32>::from_row_slice(1, 3, &[-1e-9, 2.999_999_9, 7.0]);
    let adata = AnnotatedMatrix::with_var_names(x, vec!["A".into(), "B".into(), "C".into()])
        .unwrap();
    assert!(check_raw_counts(&adata));
    assert_eq!(adata.x().count_non_integral(RAW_COUNT_TOLERANCE), 0);

    let x = nalgebra::DMatrix::<f32>::from_row_slice(1, 3, &[0.5, f32::NAN, 2.0]);
    let adata = AnnotatedMatrix::with_var_names(x, vec!["A".into(), "B".into(), "C".into()])
        .unwrap();
    assert!(!check_raw_counts(&adata));
    assert_eq!(adata.x().count_non_integral(RAW_COUNT_TOLERANCE), 2);
}

#[test]
fn raw_counts_sparse() {
    let coo = nalgebra_sparse::CooMatrix::try_from_triplets(
        3,
        2,
        vec![0, 2],
        vec![0, 1],
        vec![4.0_f32, 1.0],
    )
    .unwrap();
    let csc = nalgebra_sparse::CscMatrix::from(&coo);
    let adata = AnnotatedMatrix::with_var_names(csc, vec!["A".into(), "B".into()]).unwrap();
    assert!(adata.x().is_sparse());
    assert!(check_raw_counts(&adata));

    let coo = nalgebra_sparse::CooMatrix::try_from_triplets(
        3,
        2,
        vec![0, 2],
        vec![0, 1],
        vec![4.0_f32, 0.693],
    )
    .unwrap();
    let csc = nalgebra_sparse::CscMatrix::from(&coo);
    let adata = AnnotatedMatrix::with_var_names(csc, vec!["A".into(), "B".into()]).unwrap();
    assert!(!check_raw_counts(&adata));
}

#[test]
fn warnings_and_errors_are_combined() {
    // the raw count check runs before clustering parameters
    let params = GeneClustParams {
        relevant_gene_pct: Some(0),
        ..GeneClustParams::ps(Modality::St, 5)
    };
    assert!(check_args(&normalized(), None, &params).is_err());

    let params = GeneClustParams::ps(Modality::St, 5);
    let report = check_args(&normalized(), None, &params).unwrap();
    assert_eq!(
        report.warnings,
        vec![
            ValidationWarning::NormalizedCounts,
            ValidationWarning::MissingSpatialImage
        ]
    );
}

#[test]
fn all_genes_selected() {
    let var_names = ["A", "B", "C"];

    assert_eq!(check_all_genes_selected(&var_names, &["A", "B"]), Ok(2));

    let err = check_all_genes_selected(&var_names, &["A", "D"]).unwrap_err();
    assert_eq!(
        err,
        MixerError::SelectionMismatch {
            found: 1,
            expected: 2
        }
    );
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(
        err.to_string(),
        "Found only 1 selected genes in `var_names`, not 2."
    );

    // duplicates in the selection cannot all be matched
    assert!(check_all_genes_selected(&var_names, &["A", "A"]).is_err());

    let none: [&str; 0] = [];
    assert_eq!(check_all_genes_selected(&var_names, &none), Ok(0));
}
