#![allow(non_snake_case)]

use super::*;
use modelsmith_core::fs::MemoryFs;
use modelsmith_core::model::RelationKind;

const APP_MODULE: &str = "\
import { Module } from '@nestjs/common';
import { TypeOrmModule } from '@nestjs/typeorm';

@Module({
  imports: [TypeOrmModule.forRoot({ autoLoadEntities: true })],
})
export class AppModule {}
";

fn review_params() -> GenerateParams {
    GenerateParams::parse(&["name:string", "description:text:optional"], &[], &[]).unwrap()
}

fn project() -> MemoryFs {
    MemoryFs::new().with_file("backend/src/app.module.ts", APP_MODULE)
}

// generate tests

#[test]
fn Generator___entity___written_at_conventional_path() {
    let fs = project();
    let config = ProjectConfig::default();

    let report = Generator::new(&fs, &config)
        .generate(ArtifactKind::Entity, "review", &review_params())
        .unwrap();

    assert_eq!(report.created(), 1);
    assert_eq!(
        report.files[0].path,
        PathBuf::from("backend/src/entities/review.entity.ts")
    );
    let contents = fs.contents("backend/src/entities/review.entity.ts").unwrap();
    assert!(contents.contains("export class Review {"));
}

#[test]
fn Generator___existing_target___skipped_and_untouched() {
    let fs = project().with_file("backend/src/entities/review.entity.ts", "// hand written\n");
    let config = ProjectConfig::default();

    let report = Generator::new(&fs, &config)
        .generate(ArtifactKind::Entity, "Review", &review_params())
        .unwrap();

    assert_eq!(report.outcome(ArtifactKind::Entity), Some(&Outcome::skipped()));
    assert_eq!(
        fs.contents("backend/src/entities/review.entity.ts").unwrap(),
        "// hand written\n"
    );
}

#[test]
fn Generator___write_denied___fails_that_file_only() {
    let fs = project();
    fs.deny_writes_under("backend/src/entities");
    let config = ProjectConfig::default();

    let report = Generator::new(&fs, &config)
        .generate_module("Review", &review_params())
        .unwrap();

    assert!(matches!(
        report.outcome(ArtifactKind::Entity),
        Some(Outcome::Failed(_))
    ));
    assert_eq!(report.outcome(ArtifactKind::Service), Some(&Outcome::Created));
    assert!(fs.contents("backend/src/modules/reviews/reviews.service.ts").is_some());
}

#[test]
fn Generator___invalid_name___rejected_before_writing() {
    let fs = project();
    let config = ProjectConfig::default();

    let err = Generator::new(&fs, &config)
        .generate(ArtifactKind::Entity, "9lives", &GenerateParams::default())
        .unwrap_err();

    assert!(matches!(err, ModelsmithError::InvalidName(_)));
    assert_eq!(fs.paths().len(), 1);
}

#[test]
fn Generator___migration_without_timestamp___missing_parameter() {
    let fs = project();
    let config = ProjectConfig::default();

    let err = Generator::new(&fs, &config)
        .generate(ArtifactKind::Migration, "Review", &review_params())
        .unwrap_err();

    assert!(matches!(err, ModelsmithError::MissingParameter("timestamp")));
}

#[test]
fn Generator___migration___timestamp_only_in_file_name() {
    let fs = project();
    let config = ProjectConfig::default();
    let params = review_params().with_timestamp("1700000000000");

    let report = Generator::new(&fs, &config)
        .generate(ArtifactKind::Migration, "Review", &params)
        .unwrap();

    let path = &report.files[0].path;
    assert_eq!(
        path,
        &PathBuf::from("backend/src/migrations/1700000000000-CreateReviewsTable.ts")
    );
    assert!(!fs.contents(path).unwrap().contains("1700000000000"));
}

#[test]
fn Generator___app_module_kind___not_generatable() {
    let fs = project();
    let config = ProjectConfig::default();

    let result = Generator::new(&fs, &config).generate(
        ArtifactKind::AppModule,
        "Review",
        &GenerateParams::default(),
    );

    assert!(matches!(result, Err(ModelsmithError::UnknownArtifactKind(_))));
}

// shape tests

#[test]
fn Generator___dto_without_params___uses_entity_on_disk() {
    let fs = project().with_file(
        "backend/src/entities/review.entity.ts",
        "@Entity('reviews')\nexport class Review {\n  @PrimaryGeneratedColumn('uuid') id: string;\n  @Column({ type: 'text' }) body: string;\n}\n",
    );
    let config = ProjectConfig::default();

    Generator::new(&fs, &config)
        .generate(ArtifactKind::CreateDto, "Review", &GenerateParams::default())
        .unwrap();

    let dto = fs
        .contents("backend/src/modules/reviews/dto/create-review.dto.ts")
        .unwrap();
    assert!(dto.contains("  @IsString()\n  @IsNotEmpty()\n  body: string;\n"));
    assert!(!dto.contains("id: string"));
}

#[test]
fn Generator___service_for_existing_entity___loads_its_relations() {
    let fs = project().with_file(
        "backend/src/entities/review.entity.ts",
        "@Entity()\nexport class Review {\n  @ManyToOne(() => Product) product: Product;\n  @ManyToOne(() => User) author: User;\n}\n",
    );
    let config = ProjectConfig::default();

    Generator::new(&fs, &config)
        .generate(ArtifactKind::Service, "Review", &GenerateParams::default())
        .unwrap();

    let service = fs
        .contents("backend/src/modules/reviews/reviews.service.ts")
        .unwrap();
    assert!(service.contains("relations: ['product', 'author'],"));
    assert!(service.contains("import { Review } from '../../entities/review.entity';"));
}

#[test]
fn Generator___module_without_entity___is_stub() {
    let fs = project();
    let config = ProjectConfig::default();

    Generator::new(&fs, &config)
        .generate(ArtifactKind::Module, "Review", &GenerateParams::default())
        .unwrap();

    let module = fs
        .contents("backend/src/modules/reviews/reviews.module.ts")
        .unwrap();
    assert!(!module.contains("TypeOrmModule"));
}

#[test]
fn Generator___module_with_entity___is_full() {
    let fs = project().with_file(
        "backend/src/entities/review.entity.ts",
        "@Entity() export class Review {}",
    );
    let config = ProjectConfig::default();

    Generator::new(&fs, &config)
        .generate(ArtifactKind::Module, "Review", &GenerateParams::default())
        .unwrap();

    let module = fs
        .contents("backend/src/modules/reviews/reviews.module.ts")
        .unwrap();
    assert!(module.contains("TypeOrmModule.forFeature([Review])"));
}

// generate_module tests

#[test]
fn Generator___generate_module___five_steps_then_registration() {
    let fs = project();
    let config = ProjectConfig::default();
    let params = GenerateParams {
        relations: vec![crate::params::RelationSpec {
            kind: RelationKind::ManyToOne,
            target: "Product".to_string(),
            nullable: false,
        }],
        ..review_params()
    };

    let report = Generator::new(&fs, &config)
        .generate_module("Review", &params)
        .unwrap();

    let kinds: Vec<ArtifactKind> = report.files.iter().map(|f| f.kind).collect();
    assert_eq!(kinds[..6], MODULE_STEPS);
    assert_eq!(kinds[6], ArtifactKind::AppModule);
    assert_eq!(report.created(), 6);
    assert_eq!(report.outcome(ArtifactKind::AppModule), Some(&Outcome::Updated));

    let module = fs
        .contents("backend/src/modules/reviews/reviews.module.ts")
        .unwrap();
    assert!(module.contains("TypeOrmModule.forFeature([Review])"));

    let app = fs.contents("backend/src/app.module.ts").unwrap();
    assert!(app.contains(
        "import { TypeOrmModule } from '@nestjs/typeorm';\nimport { ReviewsModule } from './modules/reviews/reviews.module';\n"
    ));
    assert!(app.contains("imports: [\n    ReviewsModule,"));
}

#[test]
fn Generator___generate_module_twice___skips_and_warns() {
    let fs = project();
    let config = ProjectConfig::default();
    let generator = Generator::new(&fs, &config);
    generator.generate_module("Review", &review_params()).unwrap();
    let app_before = fs.contents("backend/src/app.module.ts").unwrap();

    let report = generator.generate_module("Review", &review_params()).unwrap();

    assert_eq!(report.skipped(), 6);
    assert_eq!(
        report.outcome(ArtifactKind::AppModule),
        Some(&Outcome::Warning("module is already registered".to_string()))
    );
    assert_eq!(fs.contents("backend/src/app.module.ts").unwrap(), app_before);
}

#[test]
fn Generator___missing_app_module___registration_is_soft_warning() {
    let fs = MemoryFs::new();
    let config = ProjectConfig::default();

    let report = Generator::new(&fs, &config)
        .generate_module("Review", &review_params())
        .unwrap();

    assert_eq!(report.created(), 6);
    assert_eq!(report.warnings(), 1);
    assert!(!report.has_failures());
}

#[test]
fn Generator___missing_anchor___files_kept_warning_reported() {
    let fs = MemoryFs::new().with_file(
        "backend/src/app.module.ts",
        "@Module({ imports: [] })\nexport class AppModule {}\n",
    );
    let config = ProjectConfig::default();

    let report = Generator::new(&fs, &config)
        .generate_module("Review", &review_params())
        .unwrap();

    assert_eq!(
        report.outcome(ArtifactKind::AppModule),
        Some(&Outcome::Warning("anchor import not found".to_string()))
    );
    assert!(fs.contents("backend/src/entities/review.entity.ts").is_some());
}

// frontend tests

#[test]
fn Generator___frontend_kinds___land_in_configured_dirs() {
    let fs = MemoryFs::new();
    let config = ProjectConfig::default();
    let generator = Generator::new(&fs, &config);
    let params = GenerateParams::parse::<&str>(&[], &[], &["title:string"]).unwrap();

    for (kind, name) in [
        (ArtifactKind::Component, "review-card"),
        (ArtifactKind::Page, "Reviews"),
        (ArtifactKind::Hook, "reviews"),
        (ArtifactKind::ApiClient, "Review"),
        (ArtifactKind::Animation, "fade-in"),
    ] {
        let report = generator.generate(kind, name, &params).unwrap();
        assert_eq!(report.created(), 1, "{kind}");
    }

    let paths: Vec<String> = fs
        .paths()
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "frontend/src/animations/fadeIn.ts",
            "frontend/src/api/reviews.ts",
            "frontend/src/components/ReviewCard.tsx",
            "frontend/src/hooks/useReviews.ts",
            "frontend/src/pages/ReviewsPage.tsx",
        ]
    );
    let hook = fs.contents("frontend/src/hooks/useReviews.ts").unwrap();
    assert!(hook.contains("from '../api/reviews';"));
}

#[test]
fn Generator___api_client___uses_docs_base_url_and_prefix() {
    let fs = MemoryFs::new();
    let config =
        ProjectConfig::from_str("[docs]\nbase_url = \"https://shop.test/\"\napi_prefix = \"/api/\"\n").unwrap();

    Generator::new(&fs, &config)
        .generate(ArtifactKind::ApiClient, "Review", &GenerateParams::default())
        .unwrap();

    let client = fs.contents("frontend/src/api/reviews.ts").unwrap();
    assert!(client.starts_with("const BASE_URL = 'https://shop.test/api/reviews';"));
}
