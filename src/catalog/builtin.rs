//! Built-in AWS service list
//!
//! Each entry is `(service name, icon file, category)`. Icon files are
//! looked up in the configured icons directory.

pub(super) const SERVICES: &[(&str, &str, &str)] = &[
    // Compute
    ("Amazon EC2", "ec2.png", "compute"),
    ("AWS Lambda", "lambda.png", "compute"),
    ("Amazon ECS", "ecs.png", "compute"),
    ("Amazon EKS", "eks.png", "compute"),
    ("AWS Fargate", "fargate.png", "compute"),
    ("AWS Batch", "batch.png", "compute"),
    ("Amazon Lightsail", "lightsail.png", "compute"),
    ("AWS Elastic Beanstalk", "elasticbeanstalk.png", "compute"),
    // Storage
    ("Amazon S3", "s3.png", "storage"),
    ("Amazon EBS", "ebs.png", "storage"),
    ("Amazon EFS", "efs.png", "storage"),
    ("Amazon S3 Glacier", "glacier.png", "storage"),
    ("AWS Storage Gateway", "storagegateway.png", "storage"),
    // Database
    ("Amazon RDS", "rds.png", "database"),
    ("Amazon DynamoDB", "dynamodb.png", "database"),
    ("Amazon Aurora", "aurora.png", "database"),
    ("Amazon Redshift", "redshift.png", "database"),
    ("Amazon ElastiCache", "elasticache.png", "database"),
    ("Amazon Neptune", "neptune.png", "database"),
    ("Amazon DocumentDB", "documentdb.png", "database"),
    // Networking & content delivery
    ("Amazon VPC", "vpc.png", "networking"),
    ("Amazon CloudFront", "cloudfront.png", "networking"),
    ("Amazon Route 53", "route53.png", "networking"),
    ("AWS Direct Connect", "directconnect.png", "networking"),
    ("Elastic Load Balancing", "elb.png", "networking"),
    ("AWS Global Accelerator", "globalaccelerator.png", "networking"),
    // Security, identity & compliance
    ("AWS IAM", "iam.png", "security"),
    ("Amazon Cognito", "cognito.png", "security"),
    ("AWS Shield", "shield.png", "security"),
    ("AWS WAF", "waf.png", "security"),
    ("AWS KMS", "kms.png", "security"),
    ("AWS Secrets Manager", "secretsmanager.png", "security"),
    // Management & governance
    ("Amazon CloudWatch", "cloudwatch.png", "management"),
    ("AWS CloudTrail", "cloudtrail.png", "management"),
    ("AWS Config", "config.png", "management"),
    ("AWS CloudFormation", "cloudformation.png", "management"),
    ("AWS Systems Manager", "systemsmanager.png", "management"),
    ("AWS Organizations", "organizations.png", "management"),
    // Application integration
    ("Amazon SNS", "sns.png", "application-integration"),
    ("Amazon SQS", "sqs.png", "application-integration"),
    ("AWS Step Functions", "stepfunctions.png", "application-integration"),
    ("Amazon EventBridge", "eventbridge.png", "application-integration"),
    ("Amazon MQ", "mq.png", "application-integration"),
    // Developer tools
    ("AWS CodePipeline", "codepipeline.png", "developer-tools"),
    ("AWS CodeBuild", "codebuild.png", "developer-tools"),
    ("AWS CodeDeploy", "codedeploy.png", "developer-tools"),
    ("AWS CodeCommit", "codecommit.png", "developer-tools"),
    // Analytics
    ("Amazon Athena", "athena.png", "analytics"),
    ("Amazon EMR", "emr.png", "analytics"),
    ("Amazon Kinesis", "kinesis.png", "analytics"),
    ("AWS Glue", "glue.png", "analytics"),
    // Machine learning
    ("Amazon SageMaker", "sagemaker.png", "machine-learning"),
    ("Amazon Rekognition", "rekognition.png", "machine-learning"),
    ("Amazon Comprehend", "comprehend.png", "machine-learning"),
    // API services
    ("Amazon API Gateway", "apigateway.png", "api"),
    ("Amazon AppSync", "appsync.png", "api"),
];
