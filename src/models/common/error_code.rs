use serde::{Deserialize, Serialize};

// 业务错误码，随 ApiResponse 返回给客户端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    Conflict = 409,
    InternalServerError = 500,

    // 认证 / 账号 (10xx)
    AuthFailed = 1001,
    RegisterFailed = 1002,
    UserNameAlreadyExists = 1003,
    UserEmailAlreadyExists = 1004,
    UserNameInvalid = 1005,
    UserEmailInvalid = 1006,
    PasswordPolicyViolation = 1007,
    // 账号缺少资料记录：视为配置错误，请求路径不自动修复
    AccountNotProvisioned = 1008,
    TokenInvalid = 1009,

    // 资料 / 教师 (20xx)
    ProfileNotFound = 2001,
    StudentIdAlreadyExists = 2002,
    TeacherIdAlreadyExists = 2003,
    TeacherNotFound = 2004,
    // 教师角色账号缺少教师记录
    TeacherRecordMissing = 2005,
    TeacherProvisionFailed = 2006,

    // 课程 (30xx)
    CourseNotFound = 3001,
    CourseCodeAlreadyExists = 3002,
    CourseCreateFailed = 3003,

    // 选课 / 成绩 (40xx)
    EnrollmentNotFound = 4001,
    CourseCapacityExceeded = 4002,
    ScoreOutOfRange = 4003,
    EnrollFailed = 4004,

    // 留言 (50xx)
    CommentNotAllowed = 5001,
    CommentNotFound = 5002,

    // 文件上传 (60xx)
    FileUploadFailed = 6001,
    FileTypeNotAllowed = 6002,
    FileSizeExceeded = 6003,
}
